/* crates/trellis-template/src/tests/mod.rs */
