//! Value formatters for RouterOS parameter values.

use std::fmt::Display;

/// Render a boolean the way RouterOS expects it.
pub fn format_boolean_value(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}

/// Values that render as a RouterOS list parameter (`a,b,c`).
pub trait ListValue {
    /// Comma-join the value; absent values render as an empty string.
    fn to_list_value(&self) -> String;
}

/// Render a list, optional or scalar value as a RouterOS list parameter.
///
/// Lists keep their order and are not de-duplicated. `None` renders as
/// `""`. Scalars render through their `Display` implementation.
pub fn format_array_value<V: ListValue + ?Sized>(value: &V) -> String {
    value.to_list_value()
}

impl<T: Display> ListValue for [T] {
    fn to_list_value(&self) -> String {
        self.iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl<T: Display> ListValue for Vec<T> {
    fn to_list_value(&self) -> String {
        self.as_slice().to_list_value()
    }
}

impl<T: Display, const N: usize> ListValue for [T; N] {
    fn to_list_value(&self) -> String {
        self.as_slice().to_list_value()
    }
}

impl<V: ListValue> ListValue for Option<V> {
    fn to_list_value(&self) -> String {
        self.as_ref().map(ListValue::to_list_value).unwrap_or_default()
    }
}

impl<V: ListValue + ?Sized> ListValue for &V {
    fn to_list_value(&self) -> String {
        (**self).to_list_value()
    }
}

macro_rules! scalar_list_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl ListValue for $ty {
                fn to_list_value(&self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

scalar_list_value!(str, String, bool, u8, u16, u32, u64, usize, i32, i64);

#[cfg(test)]
mod tests {
    use super::{format_array_value, format_boolean_value};

    #[test]
    fn booleans_render_as_yes_no() {
        assert_eq!(format_boolean_value(true), "yes");
        assert_eq!(format_boolean_value(false), "no");
    }

    #[test]
    fn array_value_is_total() {
        let none: Option<Vec<String>> = None;
        let empty: Vec<&str> = Vec::new();

        assert_eq!(format_array_value(&none), "");
        assert_eq!(format_array_value(&empty), "");
        assert_eq!(format_array_value(&["a"]), "a");
        assert_eq!(format_array_value(&["a", "b"]), "a,b");
        assert_eq!(format_array_value(&Some(vec!["b", "a", "b"])), "b,a,b");
        assert_eq!(format_array_value("mschap2"), "mschap2");
        assert_eq!(format_array_value(&1450u16), "1450");
    }
}
