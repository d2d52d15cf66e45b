#![cfg(target_arch = "wasm32")]

use blobtone_engine::World;
use wasm_bindgen_test::*;

#[wasm_bindgen_test]
fn facade_steps_and_exports_buffers() {
    let mut world = World::new(Some(r#"{"maxEntities": 10}"#.to_string())).unwrap();
    assert_eq!(world.spawn_blob(800.0, 450.0, 150.0, 0.0), 1);
    world.step(1.0 / 120.0, 0.01);

    let written = world.extract_render_buffer();
    assert_eq!(world.abi_layout().render_len_elements() as usize, written);
    assert_eq!(world.fill_audio(64).len(), 64);
}

#[wasm_bindgen_test]
fn bad_config_is_an_error() {
    assert!(World::new(Some("{".to_string())).is_err());
}
