pub mod hex_0x_bytes;
pub mod hex_0x_primitive_types_h160;
