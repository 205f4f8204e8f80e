fn main() {
	println!("cargo:rerun-if-changed=build.rs");
	println!("cargo:rerun-if-changed=src/consts/consts.toml");

	let toml_consts = toml_consts::from_str(include_str!("src/consts/consts.toml")).expect("Failed to parse consts.toml");

	let mut rs = String::new();
	toml_consts.serialize_rust(&mut rs).expect("Failed to serialize consts.toml");

	let out_dir = std::env::var("OUT_DIR").expect("OUT_DIR not set");
	std::fs::write(std::path::Path::new(&out_dir).join("consts.rs"), rs).expect("Failed to write consts.rs");
}
