/// Build version. Release pipelines stamp `APP_VERSION`; local builds use the crate version.
pub const VERSION: &str = match option_env!("APP_VERSION") {
    Some(stamped) => stamped,
    None => env!("CARGO_PKG_VERSION"),
};

#[cfg(test)]
mod tests {
    use super::VERSION;

    #[test]
    fn version_is_never_empty() {
        assert!(!VERSION.is_empty());
    }
}
