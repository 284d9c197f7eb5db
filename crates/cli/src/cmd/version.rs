//! Version information embedded at build time

/// Multi-line version report
pub fn version_info() -> String {
    let mut out = format!("giks {}\n", env!("CARGO_PKG_VERSION"));

    let details = [
        ("commit", option_env!("VERGEN_GIT_SHA")),
        ("commit date", option_env!("VERGEN_GIT_COMMIT_DATE")),
        ("built", option_env!("VERGEN_BUILD_TIMESTAMP")),
        ("rustc", option_env!("VERGEN_RUSTC_SEMVER")),
    ];
    for (label, value) in details {
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            out.push_str(&format!("{label:>12}: {value}\n"));
        }
    }
    out
}

/// Print version information
pub fn run() {
    print!("{}", version_info());
}
