fn main() {
    // Only the ESP-IDF binary needs the toolchain environment exported.
    // Host builds (tests, fuzzing) have nothing to do here.
    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
