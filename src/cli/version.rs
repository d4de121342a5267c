//! Version command handler

/// Version banner
pub fn version_info() -> String {
    format!(
        "plugdash {}\n  {}\n  License: {}",
        env!("CARGO_PKG_VERSION"),
        env!("CARGO_PKG_DESCRIPTION"),
        env!("CARGO_PKG_LICENSE"),
    )
}

/// Display version information
pub fn display_version() {
    println!("{}", version_info());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_info() {
        assert!(version_info().starts_with(&format!("plugdash {}", env!("CARGO_PKG_VERSION"))));
    }
}
