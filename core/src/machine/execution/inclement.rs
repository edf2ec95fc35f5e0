pub fn inc(op: i32) -> i32 {
    op.wrapping_add(1)
}

pub fn dec(op: i32) -> i32 {
    op.wrapping_sub(1)
}
