// Tue Jan 13 2026 - Alex

use serde::Serializer;

pub struct BinaryUtils;

impl BinaryUtils {
    /// Uppercase hex, one space between every `group` bytes.
    pub fn hex_grouped(data: &[u8], group: usize) -> String {
        let group = group.max(1);
        let mut result = String::with_capacity(data.len() * 2 + data.len() / group);

        for (i, chunk) in data.chunks(group).enumerate() {
            if i != 0 {
                result.push(' ');
            }
            for byte in chunk {
                result.push_str(&format!("{:02X}", byte));
            }
        }

        result
    }
}

pub fn hex_dump(data: &[u8]) -> String {
    BinaryUtils::hex_grouped(data, 8)
}

pub fn serialize_hex_grouped<S: Serializer>(data: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&hex_dump(data))
}
