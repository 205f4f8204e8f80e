use std::{str::FromStr, collections::BTreeMap};

#[macro_use] extern crate serde;

macro_rules! define_types {
	{$(
		$enum:ident: {
			toml: $toml:literal,
			rust: $rust:ty,
			serde: $serde:ident
		}
	),*} => {
		#[derive(Clone, Copy, Debug)]
		pub enum ConstType {
			$($enum),*
		}
		impl<'de> serde::Deserialize<'de> for ConstType {
			fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
			where
				D: serde::Deserializer<'de>
			{
				// Owned, as toml hands out no borrowed strings
				let str: String = serde::Deserialize::deserialize(deserializer)?;
				match str.as_str() {
					$($toml => Ok(ConstType::$enum),)*
					_ => Err(serde::de::Error::custom(format!("unknown type: {}", str)))
				}
			}
		}
		impl ConstType {
			fn serialize_rust<W: std::fmt::Write>(self, name: &str, fmt: &mut W, value: &toml::Value) -> std::fmt::Result {
				match self {
					$(ConstType::$enum => {
						if let Some(values) = value.as_array() {
							write!(fmt, concat!("pub const {}: [", stringify!($rust), "; {}] = ["), name, values.len())?;

							for (i, value) in values.iter().enumerate() {
								if i != 0 {
									fmt.write_str(", ")?;
								}
								write!(fmt, "{:?}", match value.$serde() {
									Some(value) => value as $rust,
									None => panic!(concat!("expected ", $toml, " for {}"), name)
								})?;
							}

							writeln!(fmt, "];")
						} else {
							let value = match value.$serde() {
								Some(value) => value as $rust,
								None => panic!(concat!("expected ", $toml, " for {}"), name)
							};
							writeln!(fmt, concat!("pub const {}: ", stringify!($rust), " = {:?};"), name, value)
						}
					}),*
				}
			}
		}
	};
}

define_types! {
	I16: {
		toml: "i16",
		rust: i16,
		serde: as_integer
	},
	U8: {
		toml: "u8",
		rust: u8,
		serde: as_integer
	},
	U32: {
		toml: "u32",
		rust: u32,
		serde: as_integer
	},
	U64: {
		toml: "u64",
		rust: u64,
		serde: as_integer
	}
}

#[derive(Deserialize, Clone, Debug)]
struct TomlConst {
	#[serde(rename = "type")]
	const_type: ConstType,
	value: toml::Value,
	#[serde(default)]
	doc: Option<String>
}

#[derive(Clone, Debug)]
pub struct TomlConsts(BTreeMap<String, TomlConst>);
impl FromStr for TomlConsts {
	type Err = toml::de::Error;

	fn from_str(str: &str) -> Result<Self, Self::Err> {
		Ok(TomlConsts(toml::from_str(str)?))
	}
}
impl TomlConsts {
	pub fn serialize_rust<W: std::fmt::Write>(&self, w: &mut W) -> std::fmt::Result {
		self.0.iter().try_for_each(|(name, toml_const)| {
			if let Some(doc) = &toml_const.doc {
				for line in doc.lines() {
					writeln!(w, "/// {}", line.trim())?;
				}
			}
			toml_const.const_type.serialize_rust(name, w, &toml_const.value)
		})
	}

	#[inline]
	pub fn len(&self) -> usize {
		self.0.len()
	}

	#[inline]
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

#[inline]
pub fn from_str(str: &str) -> Result<TomlConsts, <TomlConsts as FromStr>::Err> {
	TomlConsts::from_str(str)
}

#[test]
fn test_serialize_rust() {
	let consts = from_str(r#"
		MIN_CELL_WIDTH = { type = "u32", value = 18, doc = "Smallest cell stride" }
		BEVEL_BLUE_RED_DIFF = { type = "i16", value = 60 }
		WINDOW = { type = "u8", value = [3, 18] }
	"#).unwrap();

	assert_eq!(consts.len(), 3);

	let mut rs = String::new();
	consts.serialize_rust(&mut rs).unwrap();

	assert_eq!(
		rs,
		"pub const BEVEL_BLUE_RED_DIFF: i16 = 60;\n\
		/// Smallest cell stride\n\
		pub const MIN_CELL_WIDTH: u32 = 18;\n\
		pub const WINDOW: [u8; 2] = [3, 18];\n"
	);
}

#[test]
fn test_known_types() {
	let consts = from_str(r#"
		A = { type = "u8", value = 1 }
		B = { type = "i16", value = -2 }
		C = { type = "u32", value = 3 }
		D = { type = "u64", value = 4 }
	"#).unwrap();

	let mut rs = String::new();
	consts.serialize_rust(&mut rs).unwrap();
	assert_eq!(rs, "pub const A: u8 = 1;\npub const B: i16 = -2;\npub const C: u32 = 3;\npub const D: u64 = 4;\n");
}

#[test]
fn test_unknown_type() {
	assert!(from_str(r#"YES = { type = "u32", value = 1 }"#).is_ok());

	let err = from_str(r#"NOPE = { type = "u128", value = 1 }"#).unwrap_err();
	assert!(err.to_string().contains("unknown type: u128"), "{err}");
}

#[test]
fn test_consts_toml() {
	let consts = from_str(include_str!("../../vision-common/src/consts/consts.toml")).unwrap();
	assert!(!consts.is_empty());

	let mut rs = String::new();
	consts.serialize_rust(&mut rs).unwrap();
	assert!(rs.contains("pub const MIN_CELL_WIDTH: u32 = 18;\n"), "{rs}");
	assert!(rs.contains("pub const BEVEL_BLUE_RED_DIFF: i16 = 60;\n"), "{rs}");
}
