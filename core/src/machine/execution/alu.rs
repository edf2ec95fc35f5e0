/// Two-input operation applied to `I0` and `I1`, result lands in `O0`.
pub type AluOp = fn(i32, i32) -> i32;

pub fn add(a: i32, b: i32) -> i32 {
    a.wrapping_add(b)
}

pub fn sub(a: i32, b: i32) -> i32 {
    a.wrapping_sub(b)
}

pub fn mul(a: i32, b: i32) -> i32 {
    a.wrapping_mul(b)
}

pub fn xor(a: i32, b: i32) -> i32 {
    a ^ b
}
