use num_bigint::{BigInt, BigUint, Sign};
use num_integer::Integer;
use num_traits::{One, Zero};

/// Inverse of `a` modulo `m`, if it exists
pub(crate) fn mod_inverse(a: &BigUint, m: &BigUint) -> Option<BigUint> {
    if m.is_zero() {
        return None;
    }
    let a = BigInt::from_biguint(Sign::Plus, a % m);
    let m = BigInt::from_biguint(Sign::Plus, m.clone());
    let egcd = a.extended_gcd(&m);
    if !egcd.gcd.is_one() {
        return None;
    }
    egcd.x.mod_floor(&m).to_biguint()
}

/// Carmichael's function of `p * q`, for primes `p` and `q`
pub(crate) fn lambda(p: &BigUint, q: &BigUint) -> BigUint {
    let one = BigUint::one();
    (p - &one).lcm(&(q - &one))
}
