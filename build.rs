fn main() {
    // Forward ESP-IDF link arguments and sdkconfig metadata when building
    // for the device. Host builds (cargo test --no-default-features) have
    // no ESP-IDF environment and skip this.
    if std::env::var("CARGO_FEATURE_ESPIDF").is_ok() {
        embuild::espidf::sysenv::output();
    }
}
