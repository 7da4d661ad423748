fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Version string without pulling in git tooling
    let version = std::env::var("CARGO_PKG_VERSION")?;
    let describe = std::env::var("TABLE_TIMER_BUILD_DESCRIBE")
        .unwrap_or_else(|_| format!("{}-dev", version));
    println!("cargo:rustc-env=VERGEN_GIT_DESCRIBE={}", describe);
    println!("cargo:rerun-if-env-changed=TABLE_TIMER_BUILD_DESCRIBE");
    Ok(())
}
