//! Build script for hexbound-core
//!
//! Checks the toolchain before compilation. `std::backtrace::Backtrace` was
//! stabilized in Rust 1.65.0, and error objects capture one on construction.

fn main()
{
    println!("cargo:rerun-if-changed=build.rs");

    if let Ok(rustc_version) = rustc_version::version() {
        let min_rust_version = rustc_version::Version::new(1, 65, 0);

        assert!(
            rustc_version >= min_rust_version,
            "hexbound-core requires Rust {min_rust_version} or newer (std::backtrace), found {rustc_version}"
        );
    } else {
        // Some build environments hide rustc; don't fail the build over it
        println!("cargo:warning=could not verify Rust version");
    }
}
