/// Intercept messages using the `log` crate and print them to STDERR. Defaults to the `info`
/// level; override with `RUST_LOG`, like `RUST_LOG=dogleg=debug`.
pub fn setup() {
    use env_logger::{Builder, Env};
    Builder::from_env(Env::default().default_filter_or("info")).init();
}
