use expense_tracker::{init, utils::build_info};

#[test]
fn init_and_build_metadata_smoke() {
    init();
    init();

    let meta = build_info::current();
    assert_eq!(meta.version, env!("CARGO_PKG_VERSION"));
    assert!(meta.rows().iter().any(|(label, _)| *label == "Build hash"));
}
