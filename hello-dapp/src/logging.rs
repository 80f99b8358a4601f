use tracing_subscriber::EnvFilter;

/// Install the global `fmt` subscriber
///
/// `RUST_LOG` is honoured; on top of it our crate logs at info level and the
/// HTTP stack is kept quiet.
pub fn init() {
    let filter = EnvFilter::from_default_env()
        .add_directive("hello_dapp=info".parse().expect("static directive"))
        .add_directive("actix_web=error".parse().expect("static directive"))
        .add_directive("hyper=warn".parse().expect("static directive"))
        .add_directive("reqwest=warn".parse().expect("static directive"));

    // Initialize the tracing subscriber with our filter
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init();
}
