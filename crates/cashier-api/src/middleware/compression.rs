//! Response compression layer.

use tower_http::compression::CompressionLayer;

/// Gzip compression for proxied JSON and static assets.
pub fn build_compression_layer() -> CompressionLayer {
    CompressionLayer::new().gzip(true)
}
