//! Truthiness, the default predicate of [`every`](super::every) and
//! [`some`](super::some).

/// Types that can be judged "truthy" without an explicit predicate.
///
/// # Examples
///
/// ```rust
/// use lambdash::collection::Truthy;
///
/// assert!(1_i32.is_truthy());
/// assert!(!0_i32.is_truthy());
/// assert!(!f64::NAN.is_truthy());
/// assert!("text".is_truthy());
/// assert!(!"".is_truthy());
/// assert!(!None::<bool>.is_truthy());
/// assert!(!Some(false).is_truthy());
/// ```
pub trait Truthy {
    /// Returns whether the value counts as true.
    fn is_truthy(&self) -> bool;
}

impl Truthy for bool {
    #[inline]
    fn is_truthy(&self) -> bool {
        *self
    }
}

macro_rules! impl_truthy_for_integers {
    ($($integer:ty),* $(,)?) => {
        $(
            impl Truthy for $integer {
                #[inline]
                fn is_truthy(&self) -> bool {
                    *self != 0
                }
            }
        )*
    };
}

impl_truthy_for_integers!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

macro_rules! impl_truthy_for_floats {
    ($($float:ty),* $(,)?) => {
        $(
            impl Truthy for $float {
                #[inline]
                fn is_truthy(&self) -> bool {
                    *self != 0.0 && !self.is_nan()
                }
            }
        )*
    };
}

impl_truthy_for_floats!(f32, f64);

impl Truthy for str {
    #[inline]
    fn is_truthy(&self) -> bool {
        !self.is_empty()
    }
}

impl Truthy for String {
    #[inline]
    fn is_truthy(&self) -> bool {
        !self.is_empty()
    }
}

impl<T: Truthy> Truthy for Option<T> {
    #[inline]
    fn is_truthy(&self) -> bool {
        self.as_ref().is_some_and(Truthy::is_truthy)
    }
}

impl<T: Truthy + ?Sized> Truthy for &T {
    #[inline]
    fn is_truthy(&self) -> bool {
        (**self).is_truthy()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0_i64, false)]
    #[case(-3_i64, true)]
    #[case(42_i64, true)]
    fn test_integer_truthiness(#[case] value: i64, #[case] expected: bool) {
        assert_eq!(value.is_truthy(), expected);
    }

    #[rstest]
    #[case(0.0, false)]
    #[case(-0.0, false)]
    #[case(f64::NAN, false)]
    #[case(0.5, true)]
    #[case(f64::INFINITY, true)]
    fn test_float_truthiness(#[case] value: f64, #[case] expected: bool) {
        assert_eq!(value.is_truthy(), expected);
    }

    #[rstest]
    fn test_reference_delegates() {
        let value = String::from("x");
        let reference = &value;
        assert!(reference.is_truthy());
        assert!(!(&&0_u8).is_truthy());
    }
}
