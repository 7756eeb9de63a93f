// Keep the binary a thin wrapper; everything lives in the library
fn main() -> std::process::ExitCode {
    korektor_lib::run()
}
