fn main() {
    // The desktop shell needs tauri.conf.json; the library builds without it.
    #[cfg(feature = "tauri-app")]
    tauri_build::build();
}
