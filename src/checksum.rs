/// CRC16 as computed by the RCT device family.
///
/// CCITT polynomial `0x1021` with a zero initial value; input of odd length
/// is padded with a single zero byte before the division. The padding rule is
/// firmware behavior and must be kept for captured frames to verify.
pub fn crc16(data: &[u8]) -> u16 {
    let padding = std::iter::repeat(0u8).take(data.len() & 1);
    let mut crc: u16 = 0;
    for byte in data.iter().copied().chain(padding) {
        crc ^= u16::from(byte) << 8;
        for _ in 0..8 {
            crc = if crc & 0x8000 != 0 { (crc << 1) ^ 0x1021 } else { crc << 1 };
        }
    }
    crc
}
