//! Declarative macros for reducing score type boilerplate.
//!
//! These macros generate the repetitive trait implementations that all
//! field-based score types share: ordering, arithmetic ops, scaling, and
//! slash-separated parsing. Every score type stores an `init_score` field
//! next to its levels, and its constructor takes the init score first.

/// Generates `PartialOrd`, `Ord`, `Add`, `Sub`, and `Neg` for a field-based score type.
///
/// Ordering compares `init_score` first, then the listed fields left to right.
///
/// # Usage
/// ```ignore
/// impl_score_ops!(HardSoftScore { hard, soft } => of_uninitialized);
/// ```
macro_rules! impl_score_ops {
    ($type:ident { $($field:ident),+ } => $ctor:ident) => {
        impl PartialOrd for $type {
            fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
                Some(self.cmp(other))
            }
        }

        impl Ord for $type {
            fn cmp(&self, other: &Self) -> std::cmp::Ordering {
                self.init_score
                    .cmp(&other.init_score)
                    $( .then_with(|| self.$field.cmp(&other.$field)) )+
            }
        }

        impl std::ops::Add for $type {
            type Output = Self;

            fn add(self, other: Self) -> Self {
                $type::$ctor(
                    self.init_score + other.init_score,
                    $(self.$field + other.$field),+
                )
            }
        }

        impl std::ops::Sub for $type {
            type Output = Self;

            fn sub(self, other: Self) -> Self {
                $type::$ctor(
                    self.init_score - other.init_score,
                    $(self.$field - other.$field),+
                )
            }
        }

        impl std::ops::Neg for $type {
            type Output = Self;

            fn neg(self) -> Self {
                $type::$ctor(-self.init_score, $(-self.$field),+)
            }
        }
    };
}

/// Generates `multiply`, `divide`, `power`, and `abs` for the `Score` trait impl.
///
/// Intended to be used *inside* an `impl Score for Type { ... }` block.
/// Every component, the init score included, is floored after scaling.
macro_rules! impl_score_scale {
    ($type:ident { $($field:ident),+ } => $ctor:ident) => {
        fn multiply(&self, multiplicand: f64) -> Self {
            use $crate::score::traits::floor_to_i64;
            $type::$ctor(
                floor_to_i64(self.init_score as f64 * multiplicand),
                $( floor_to_i64(self.$field as f64 * multiplicand) ),+
            )
        }

        fn divide(&self, divisor: f64) -> Self {
            use $crate::score::traits::{checked_divisor, floor_to_i64};
            let divisor = checked_divisor(divisor);
            $type::$ctor(
                floor_to_i64(self.init_score as f64 / divisor),
                $( floor_to_i64(self.$field as f64 / divisor) ),+
            )
        }

        fn power(&self, exponent: f64) -> Self {
            use $crate::score::traits::floor_to_i64;
            $type::$ctor(
                floor_to_i64((self.init_score as f64).powf(exponent)),
                $( floor_to_i64((self.$field as f64).powf(exponent)) ),+
            )
        }

        fn abs(&self) -> Self {
            $type::$ctor(self.init_score.abs(), $( self.$field.abs() ),+)
        }
    };
}

/// Generates `ParseableScore`, `Display`, and `Debug` for scores using the
/// `"[Ninit/]Xsuffix/Ysuffix"` format.
///
/// The init part is written only when the init score is non-zero, and is
/// optional when parsing.
///
/// # Usage
/// ```ignore
/// impl_score_parse!(HardSoftScore { hard => "hard", soft => "soft" } => of_uninitialized);
/// ```
macro_rules! impl_score_parse {
    ($type:ident { $($field:ident => $suffix:literal),+ } => $ctor:ident) => {
        impl $crate::score::traits::ParseableScore for $type {
            fn parse(s: &str) -> Result<Self, $crate::score::traits::ScoreParseError> {
                use $crate::score::traits::ScoreParseError;

                let s = s.trim();
                let mut parts: Vec<&str> = s.split('/').collect();
                let suffixes: &[&str] = &[ $($suffix),+ ];
                let count = suffixes.len();

                let init_score = if parts.len() == count + 1 {
                    let part = parts.remove(0).trim();
                    let num_str = part.strip_suffix("init").ok_or_else(|| ScoreParseError {
                        message: format!("init part '{}' must end with 'init'", part),
                    })?;
                    num_str.parse::<i64>().map_err(|e| ScoreParseError {
                        message: format!("Invalid init score '{}': {}", num_str, e),
                    })?
                } else {
                    0
                };

                if parts.len() != count {
                    return Err(ScoreParseError {
                        message: format!(
                            "Invalid {} format '{}': expected {} parts separated by '/'",
                            stringify!($type), s, count
                        ),
                    });
                }

                let mut _idx = 0usize;
                $(
                    let $field = {
                        let part = parts[_idx].trim();
                        let num_str = part.strip_suffix($suffix).ok_or_else(|| {
                            ScoreParseError {
                                message: format!(
                                    "{} part '{}' must end with '{}'",
                                    stringify!($field), part, $suffix
                                ),
                            }
                        })?;
                        let val = num_str.parse::<i64>().map_err(|e| ScoreParseError {
                            message: format!("Invalid {} score '{}': {}", stringify!($field), num_str, e),
                        })?;
                        _idx += 1;
                        val
                    };
                )+

                Ok($type::$ctor(init_score, $($field),+))
            }

            fn to_string_repr(&self) -> String {
                let mut parts = Vec::new();
                if self.init_score != 0 {
                    parts.push(format!("{}init", self.init_score));
                }
                $(
                    parts.push(format!("{}{}", self.$field, $suffix));
                )+
                parts.join("/")
            }
        }

        impl std::fmt::Display for $type {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                use $crate::score::traits::ParseableScore;
                f.write_str(&self.to_string_repr())
            }
        }

        impl std::fmt::Debug for $type {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}({})", stringify!($type), self)
            }
        }
    };
}

// Macros are used via #[macro_use] on the module declaration.
