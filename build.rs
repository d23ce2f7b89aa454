fn main(){
    let crate_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap();

    println!("cargo:rerun-if-changed=src/ffi/mod.rs");

    let mut config = cbindgen::Config::default();
    config.language = cbindgen::Language::C;
    config.include_guard = Some("PICO_CONTROL_H".to_string());

    cbindgen::Builder::new()
        .with_src(std::path::Path::new(&crate_dir).join("src/ffi/mod.rs"))
        .with_config(config)
        .generate()
        .expect("Unable to generate bindings")
        .write_to_file("include/pico_control.h");
}
