//! Test macros for NonZero newtype wrappers
//!
//! Reusable macros that cut boilerplate when testing the millisecond
//! newtypes in [`crate::types`].

/// Generate standard tests for a NonZero newtype wrapper
///
/// # Arguments
/// * `$type_name` - The newtype struct name (e.g., `PollInterval`)
/// * `$default_value` - Expected value of the DEFAULT constant
/// * `$test_value` - A valid non-zero value for testing
///
/// # Generated Tests
/// - `test_default` - Verifies DEFAULT constant value
/// - `test_new_valid` - Tests creating with valid non-zero value
/// - `test_new_zero_rejected` - Verifies zero returns None
/// - `test_clone_equality` - Tests Clone and PartialEq
///
/// # Example
/// ```ignore
/// test_nonzero_newtype!(PollInterval, 1000, 250);
/// ```
#[macro_export]
macro_rules! test_nonzero_newtype {
    ($type_name:ident, $default_value:expr, $test_value:expr) => {
        #[test]
        fn test_default() {
            assert_eq!($type_name::DEFAULT.get(), $default_value);
        }

        #[test]
        fn test_new_valid() {
            let value = $type_name::new($test_value).unwrap();
            assert_eq!(value.get(), $test_value);
        }

        #[test]
        fn test_new_zero_rejected() {
            assert!($type_name::new(0).is_none());
        }

        #[test]
        fn test_clone_equality() {
            let val1 = $type_name::new($test_value).unwrap();
            let val2 = val1.clone();
            let val3 = $type_name::new($test_value).unwrap();
            let val4 = $type_name::new($default_value).unwrap();

            assert_eq!(val1, val2);
            assert_eq!(val1, val3);
            assert_ne!(val1, val4);
        }
    };
}

/// Generate Ord/PartialOrd tests for a newtype with ordering
///
/// # Arguments
/// * `$type_name` - The newtype struct name
/// * `$small_value` - A smaller value for comparison
/// * `$large_value` - A larger value for comparison
#[macro_export]
macro_rules! test_newtype_ordering {
    ($type_name:ident, $small_value:expr, $large_value:expr) => {
        #[test]
        fn test_ordering() {
            let small = $type_name::new($small_value).unwrap();
            let large = $type_name::new($large_value).unwrap();
            let equal = $type_name::new($small_value).unwrap();

            assert!(small < large);
            assert!(large > small);
            assert!(small <= equal);
            assert!(small >= equal);
        }
    };
}
