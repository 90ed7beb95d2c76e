pub mod client;

#[cfg(test)]
pub mod test_support;

pub use client::MarketplaceClient;
