fn main() {
    let check_cfg = rustc_minor_version().is_some_and(|minor| minor >= 80);
    if check_cfg {
        println!("cargo:rustc-check-cfg=cfg(deny_warnings)");
        println!("cargo:rustc-check-cfg=cfg(docsrs)");
    }

    println!("cargo::rerun-if-changed=build.rs");
    println!("cargo::rerun-if-env-changed=MDARRAY_DENY_WARNINGS");
    if std::env::var("MDARRAY_DENY_WARNINGS").as_deref() == Ok("1") {
        println!("cargo:rustc-cfg=deny_warnings");
    }
}

/// Minor version of the active `rustc`, e.g. `80` for `rustc 1.80.1`.
fn rustc_minor_version() -> Option<u32> {
    let rustc = std::env::var_os("RUSTC")?;
    let output = std::process::Command::new(rustc)
        .arg("--version")
        .output()
        .ok()?;
    let version = String::from_utf8(output.stdout).ok()?;
    let rest = version.strip_prefix("rustc 1.")?;
    rest.split('.').next()?.parse().ok()
}
