// Tue Jan 13 2026 - Alex

use std::env;

const STDLIB_OVERRIDE: &str = "ABI_LAYOUT_PROBE_STDLIB";

fn main() {
    println!("cargo:rerun-if-changed=cpp");
    println!("cargo:rerun-if-env-changed={}", STDLIB_OVERRIDE);
    println!("cargo:rustc-check-cfg=cfg(string_abi, values(\"msvc\", \"libcxx\", \"libstdcxx\"))");

    let target_env = env::var("CARGO_CFG_TARGET_ENV").unwrap_or_default();
    let target_os = env::var("CARGO_CFG_TARGET_OS").unwrap_or_default();
    let target_vendor = env::var("CARGO_CFG_TARGET_VENDOR").unwrap_or_default();

    let profile = match env::var(STDLIB_OVERRIDE).ok().as_deref() {
        Some("libc++") => "libcxx",
        Some("libstdc++") => "libstdcxx",
        Some(other) => panic!("{} must be libc++ or libstdc++, got {:?}", STDLIB_OVERRIDE, other),
        None if target_env == "msvc" => "msvc",
        None if target_vendor == "apple"
            || matches!(target_os.as_str(), "android" | "freebsd" | "openbsd") => "libcxx",
        None => "libstdcxx",
    };

    println!("cargo:rustc-cfg=string_abi=\"{}\"", profile);

    let mut build = cc::Build::new();
    build
        .cpp(true)
        .std("c++17")
        .include("cpp/include")
        .file("cpp/string_probe.cpp")
        .file("cpp/nested_aggregate.cpp")
        .flag_if_supported("-Wno-unused-private-field");

    if env::var(STDLIB_OVERRIDE).is_ok() {
        build.cpp_set_stdlib(match profile {
            "libcxx" => "c++",
            _ => "stdc++",
        });
    }

    build.compile("layout_probe_native");
}
