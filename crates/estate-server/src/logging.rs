//! Tracing subscriber setup.

use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global subscriber.
///
/// `RUST_LOG` takes precedence; the server's own target defaults to debug.
pub fn init_tracing(json: bool) -> Result<()> {
    let filter = EnvFilter::from_default_env()
        .add_directive("estate_server=debug".parse()?)
        .add_directive("estate_core=info".parse()?);

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init()?;
    } else {
        registry.with(tracing_subscriber::fmt::layer()).try_init()?;
    }
    Ok(())
}
