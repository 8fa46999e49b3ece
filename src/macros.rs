/// Build a constant [`Oid`](oid/struct.Oid.html) from its dotted notation
///
/// The encoding is computed at compile time, so the result can be used in
/// `const` items. Prefix the arcs with `rel` to build a relative OID.
///
/// ```rust
/// use der_keys::{oid, oid::Oid};
///
/// const SHA256: Oid<'static> = oid!(2.16.840.1.101.3.4.2.1);
/// let rel = oid!(rel 4.2.1);
/// assert_eq!(SHA256.to_id_string(), "2.16.840.1.101.3.4.2.1");
/// assert_eq!(rel.as_bytes(), &[4, 2, 1]);
/// ```
#[macro_export]
macro_rules! oid {
    (rel $($item:tt)*) => {
        $crate::oid::Oid::new_relative(::std::borrow::Cow::Borrowed(
            &$crate::encode_oid!(rel $($item)*),
        ))
    };
    ($($item:tt)*) => {
        $crate::oid::Oid::new(::std::borrow::Cow::Borrowed(
            &$crate::encode_oid!($($item)*),
        ))
    };
}
