#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Flags {
    lt: bool,
    gt: bool,
    eq: bool,
    er: bool,
}

#[rustfmt::skip]
impl Flags {
    pub fn new() -> Flags {
        Flags::default()
    }

    pub fn set_less(&mut self, flag: bool) { self.lt = flag; }
    pub fn less(&self) -> bool { self.lt }

    pub fn set_greater(&mut self, flag: bool) { self.gt = flag; }
    pub fn greater(&self) -> bool { self.gt }

    pub fn set_equal(&mut self, flag: bool) { self.eq = flag; }
    pub fn equal(&self) -> bool { self.eq }

    pub fn assert_error(&mut self) { self.er = true; }
    pub fn negate_error(&mut self) { self.er = false; }
    pub fn error(&self) -> bool { self.er }
}

impl Flags {
    /// Packs the flags as `er eq gt lt` from bit 3 down to bit 0.
    pub fn get(&self) -> u8 {
        macro_rules! convert {
            ($flag: ident) => {
                self.$flag as u8
            };
        }

        let er = convert!(er) << 3;
        let eq = convert!(eq) << 2;
        let gt = convert!(gt) << 1;
        let lt = convert!(lt);

        er | eq | gt | lt
    }

    pub fn set(&mut self, bits: u8) {
        fn convert(bits: u8, location: u8) -> bool {
            (bits >> location) & 0x1 == 1
        }

        self.er = convert(bits, 3);
        self.eq = convert(bits, 2);
        self.gt = convert(bits, 1);
        self.lt = convert(bits, 0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_cleared() {
        let flags = Flags::new();
        assert_eq!(flags.get(), 0);
        assert!(!flags.less() && !flags.greater() && !flags.equal() && !flags.error());
    }

    #[test]
    fn packs_each_flag_into_its_bit() {
        let mut flags = Flags::new();
        flags.set_equal(true);
        flags.assert_error();
        assert_eq!(flags.get(), 0b1100);

        let mut other = Flags::new();
        other.set(0b1100);
        assert_eq!(other, flags);
    }
}
