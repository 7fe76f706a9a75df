// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
#[allow(dead_code)]
pub fn generate_screenplay(scenes: usize) -> String {
    let scene = "INT. KITCHEN - NIGHT\n\nRain hammers the window. MARY stirs a pot that has long since boiled dry.\n\nMARY\n(without turning)\nYou're late again.\n\nJOHN\nThe trains were stopped outside the city for an hour and nobody would say why.\n\nCUT TO:\n\n";
    scene.repeat(scenes)
}
