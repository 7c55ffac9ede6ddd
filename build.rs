fn main() {
    // Only relevant for flash builds; host-target test builds skip the
    // ESP-IDF sysenv propagation.
    if std::env::var("CARGO_FEATURE_ESPIDF").is_ok() {
        embuild::espidf::sysenv::output();
    }
}
