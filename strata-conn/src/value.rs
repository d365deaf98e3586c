use strata_error::Result;

macro_rules! impl_to_value_base {
    ($ty:ty, $enum_field:ident) => {
        impl ToValue for $ty {
            fn to_value(&self) -> Value {
                Value::$enum_field(self.clone())
            }
        }
    };
}

macro_rules! impl_to_value_cast {
    ($ty:ty, $enum_field:ident, $target:ty) => {
        impl ToValue for $ty {
            fn to_value(&self) -> Value {
                Value::$enum_field(*self as $target)
            }
        }
    };
}

macro_rules! impl_from_value_integer {
    ($ty:ty) => {
        impl FromValue for $ty {
            type Output = $ty;

            fn from_value(v: &Value) -> Result<Self::Output> {
                match v {
                    Value::Bool(v) => Ok(*v as $ty),
                    Value::I64(v) => <$ty>::try_from(*v).map_err(|e| {
                        strata_error::from_value!("Invalid value: {}, error: {}", v, e)
                    }),
                    Value::U64(v) => <$ty>::try_from(*v).map_err(|e| {
                        strata_error::from_value!("Invalid value: {}, error: {}", v, e)
                    }),
                    // Text protocol results carry numbers as strings
                    Value::Str(_) | Value::Bytes(_) => {
                        let s = String::from_value(v)?;
                        s.trim().parse::<$ty>().map_err(|e| {
                            strata_error::from_value!("Invalid value: {:?}, error: {}", s, e)
                        })
                    }
                    _ => Err(strata_error::from_value!(
                        "Invalid value: {:?}, output type: {}",
                        v,
                        stringify!($ty)
                    )),
                }
            }
        }
    };
}

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    I64(i64),
    U64(u64),
    F64(f64),
    Str(String),
    Bytes(Vec<u8>),
}

pub trait ToValue {
    fn to_value(&self) -> Value;
}

impl_to_value_base! {bool, Bool}
impl_to_value_cast! {i32, I64, i64}
impl_to_value_base! {i64, I64}
impl_to_value_cast! {u32, U64, u64}
impl_to_value_base! {u64, U64}
impl_to_value_base! {f64, F64}
impl_to_value_base! {String, Str}
impl_to_value_base! {Vec<u8>, Bytes}

impl ToValue for &str {
    fn to_value(&self) -> Value {
        Value::Str(self.to_string())
    }
}

impl<T: ToValue> ToValue for Option<T> {
    fn to_value(&self) -> Value {
        if let Some(v) = self {
            T::to_value(v)
        } else {
            Value::Null
        }
    }
}

pub trait FromValue {
    type Output;

    fn from_value(v: &Value) -> Result<Self::Output>;
}

impl<T: FromValue> FromValue for Option<T> {
    type Output = Option<<T as FromValue>::Output>;

    fn from_value(v: &Value) -> Result<Self::Output> {
        match v {
            Value::Null => Ok(None),
            _ => Ok(Some(T::from_value(v)?)),
        }
    }
}

impl FromValue for bool {
    type Output = bool;

    fn from_value(v: &Value) -> Result<Self::Output> {
        match v {
            Value::Bool(v) => Ok(*v),
            Value::I64(v) => Ok(*v != 0),
            Value::U64(v) => Ok(*v != 0),
            Value::Str(_) | Value::Bytes(_) => Ok(i64::from_value(v)? != 0),
            _ => Err(strata_error::from_value!(
                "Invalid value: {:?}, output type: {}",
                v,
                stringify!(bool)
            )),
        }
    }
}

impl_from_value_integer! {i32}
impl_from_value_integer! {i64}
impl_from_value_integer! {u32}
impl_from_value_integer! {u64}

impl FromValue for f64 {
    type Output = f64;

    fn from_value(v: &Value) -> Result<Self::Output> {
        match v {
            Value::F64(v) => Ok(*v),
            Value::I64(v) => Ok(*v as f64),
            Value::U64(v) => Ok(*v as f64),
            _ => Err(strata_error::from_value!(
                "Invalid value: {:?}, output type: {}",
                v,
                stringify!(f64)
            )),
        }
    }
}

impl FromValue for String {
    type Output = String;

    fn from_value(v: &Value) -> Result<Self::Output> {
        match v {
            Value::Str(v) => Ok(v.clone()),
            Value::Bytes(v) => String::from_utf8(v.clone())
                .map_err(|e| strata_error::from_value!("Invalid utf8 text: {}", e)),
            Value::I64(v) => Ok(v.to_string()),
            Value::U64(v) => Ok(v.to_string()),
            _ => Err(strata_error::from_value!(
                "Invalid value: {:?}, output type: {}",
                v,
                stringify!(String)
            )),
        }
    }
}

impl FromValue for Vec<u8> {
    type Output = Vec<u8>;

    fn from_value(v: &Value) -> Result<Self::Output> {
        match v {
            Value::Bytes(v) => Ok(v.clone()),
            Value::Str(v) => Ok(v.clone().into_bytes()),
            _ => Err(strata_error::from_value!(
                "Invalid value: {:?}, output type: {}",
                v,
                stringify!(Vec<u8>)
            )),
        }
    }
}
