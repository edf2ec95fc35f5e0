use std::cmp::Ordering;

use crate::machine::register::Flags;

/// Signed compare of `a` against `b`. The error flag is always cleared.
pub fn cmpi(flags: &mut Flags, a: i32, b: i32) {
    let ord = a.cmp(&b);

    flags.set_equal(ord == Ordering::Equal);
    flags.set_less(ord == Ordering::Less);
    flags.set_greater(ord == Ordering::Greater);
    flags.negate_error();
}
