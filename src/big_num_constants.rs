pub const LIMB_BITS: u32 = u32::BITS;

/// Hex digits held by one limb.
pub const HEX_DIGITS_PER_LIMB: usize = (LIMB_BITS / 4) as usize;

pub const DIGITS: [u8; 36] = [
    b'0' , b'1' , b'2' , b'3' , b'4' , b'5' ,
    b'6' , b'7' , b'8' , b'9' , b'a' , b'b' ,
    b'c' , b'd' , b'e' , b'f' , b'g' , b'h' ,
    b'i' , b'j' , b'k' , b'l' , b'm' , b'n' ,
    b'o' , b'p' , b'q' , b'r' , b's' , b't' ,
    b'u' , b'v' , b'w' , b'x' , b'y' , b'z'
];

/// Number of digits of a given radix that always fit in one limb.
pub const DIGITS_PER_INT: [usize; 37] = [
    0, 0,
    30, 19, 15, 13, 11, 11, 10, 9, 9, 8, 8, 8, 8, 7, 7, 7, 7, 7, 7, 7,
    6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 5
];

/// `radix ^ DIGITS_PER_INT[radix]`, the divisor used to peel one digit group off a magnitude.
pub const INT_RADIX: [u32; 37] = [
    0, 0,
    0x40000000, 0x4546b3db, 0x40000000, 0x48c27395, 0x159fd800,
    0x75db9c97, 0x40000000, 0x17179149, 0x3b9aca00, 0xcc6db61,
    0x19a10000, 0x309f1021, 0x57f6c100, 0xa2f1b6f,  0x10000000,
    0x18754571, 0x247dbc80, 0x3547667b, 0x4c4b4000, 0x6b5a6e1d,
    0x6c20a40,  0x8d2d931,  0xb640000,  0xe8d4a51,  0x1269ae40,
    0x17179149, 0x1cb91000, 0x23744899, 0x2b73a840, 0x34e63b41,
    0x40000000, 0x4cfa3cc1, 0x5c13d840, 0x6d91b519, 0x39aa400
];

/// Largest small value handed out by the `zero()`..`ten()` constructors.
pub const MAX_CONSTANT: usize = 10;
