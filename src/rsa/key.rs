use super::math::{lambda, mod_inverse};
use crate::error::KeyError;
use log::{debug, warn};
use num_bigint::BigUint;
use num_traits::{One, Zero};

/// Components of an RSA public key
pub trait PublicKeyParts {
    /// Returns the modulus of the key.
    fn n(&self) -> &BigUint;

    /// Returns the public exponent of the key.
    fn e(&self) -> &BigUint;

    /// Returns the modulus size in bytes.
    fn size(&self) -> usize {
        ((self.n().bits() + 7) / 8) as usize
    }
}

/// Components of a two-prime RSA private key
pub trait PrivateKeyParts: PublicKeyParts {
    /// Returns the private exponent of the key.
    fn d(&self) -> &BigUint;
    /// Returns the first prime factor.
    fn p(&self) -> &BigUint;
    /// Returns the second prime factor.
    fn q(&self) -> &BigUint;
    /// Returns `d mod (p-1)`.
    fn dp(&self) -> &BigUint;
    /// Returns `d mod (q-1)`.
    fn dq(&self) -> &BigUint;
    /// Returns `q^-1 mod p`.
    fn qinv(&self) -> &BigUint;
}

/// An RSA public key
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RsaPublicKey {
    n: BigUint,
    e: BigUint,
}

/// A two-prime RSA private key, with its CRT parameters
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RsaPrivateKey {
    pubkey_components: RsaPublicKey,
    d: BigUint,
    p: BigUint,
    q: BigUint,
    dp: BigUint,
    dq: BigUint,
    qinv: BigUint,
}

impl PublicKeyParts for RsaPublicKey {
    fn n(&self) -> &BigUint {
        &self.n
    }

    fn e(&self) -> &BigUint {
        &self.e
    }
}

impl PublicKeyParts for RsaPrivateKey {
    fn n(&self) -> &BigUint {
        &self.pubkey_components.n
    }

    fn e(&self) -> &BigUint {
        &self.pubkey_components.e
    }
}

impl PrivateKeyParts for RsaPrivateKey {
    fn d(&self) -> &BigUint {
        &self.d
    }

    fn p(&self) -> &BigUint {
        &self.p
    }

    fn q(&self) -> &BigUint {
        &self.q
    }

    fn dp(&self) -> &BigUint {
        &self.dp
    }

    fn dq(&self) -> &BigUint {
        &self.dq
    }

    fn qinv(&self) -> &BigUint {
        &self.qinv
    }
}

impl RsaPublicKey {
    /// Create a public key from its components
    pub fn new(n: BigUint, e: BigUint) -> Self {
        RsaPublicKey { n, e }
    }

    /// Raw RSA public operation: `m^e mod n`
    ///
    /// No padding is applied. `m` must be lower than the modulus.
    pub fn apply(&self, m: &BigUint) -> Result<BigUint, KeyError> {
        if m >= &self.n {
            return Err(KeyError::OutOfRange);
        }
        Ok(m.modpow(&self.e, &self.n))
    }
}

fn check(cond: bool, what: &'static str) -> Result<(), KeyError> {
    if cond {
        Ok(())
    } else {
        warn!("RSA private key rejected: {}", what);
        Err(KeyError::KeyConsistencyFailure(what))
    }
}

impl RsaPrivateKey {
    /// Create a private key from all of its parameters, as stored in an `RSAPrivateKey`
    ///
    /// Every parameter is checked against the others.
    #[allow(clippy::too_many_arguments)]
    pub fn from_parts(
        n: BigUint,
        e: BigUint,
        d: BigUint,
        p: BigUint,
        q: BigUint,
        dp: BigUint,
        dq: BigUint,
        qinv: BigUint,
    ) -> Result<Self, KeyError> {
        let key = RsaPrivateKey {
            pubkey_components: RsaPublicKey::new(n, e),
            d,
            p,
            q,
            dp,
            dq,
            qinv,
        };
        key.validate()?;
        Ok(key)
    }

    /// Create a private key from the modulus, the exponents and the primes
    ///
    /// The CRT parameters are computed.
    pub fn from_components(
        n: BigUint,
        e: BigUint,
        d: BigUint,
        p: BigUint,
        q: BigUint,
    ) -> Result<Self, KeyError> {
        check(p > BigUint::one() && q > BigUint::one(), "prime factor not greater than 1")?;
        let one = BigUint::one();
        let dp = &d % (&p - &one);
        let dq = &d % (&q - &one);
        let qinv = mod_inverse(&q, &p).ok_or(KeyError::KeyConsistencyFailure(
            "second prime is not invertible modulo the first",
        ))?;
        RsaPrivateKey::from_parts(n, e, d, p, q, dp, dq, qinv)
    }

    /// Create a private key from two primes and a public exponent
    ///
    /// The private exponent is `e^-1 mod lcm(p-1, q-1)`. The primality of `p`
    /// and `q` is not tested.
    pub fn from_primes(p: BigUint, q: BigUint, e: BigUint) -> Result<Self, KeyError> {
        check(p > BigUint::one() && q > BigUint::one(), "prime factor not greater than 1")?;
        check(p != q, "prime factors are equal")?;
        let n = &p * &q;
        let d = mod_inverse(&e, &lambda(&p, &q)).ok_or(KeyError::KeyConsistencyFailure(
            "public exponent is not invertible",
        ))?;
        RsaPrivateKey::from_components(n, e, d, p, q)
    }

    /// Check the consistency of the key parameters
    pub fn validate(&self) -> Result<(), KeyError> {
        let (n, e) = (self.n(), self.e());
        let one = BigUint::one();
        check(!n.is_zero() && !e.is_zero(), "modulus or public exponent is zero")?;
        check(self.p > one && self.q > one, "prime factor not greater than 1")?;
        check(&self.p * &self.q == *n, "modulus is not the product of the primes")?;
        check(
            (e * &self.d) % lambda(&self.p, &self.q) == one,
            "private exponent does not invert the public exponent",
        )?;
        check(&self.d % (&self.p - &one) == self.dp, "exponent1 is not d mod (p-1)")?;
        check(&self.d % (&self.q - &one) == self.dq, "exponent2 is not d mod (q-1)")?;
        check(
            mod_inverse(&self.q, &self.p).as_ref() == Some(&self.qinv),
            "coefficient is not q^-1 mod p",
        )?;
        debug!("RSA private key checked ({} bits)", n.bits());
        Ok(())
    }

    /// Get the public key
    pub fn to_public_key(&self) -> RsaPublicKey {
        self.pubkey_components.clone()
    }

    /// Raw RSA private operation: `c^d mod n`, computed with the CRT parameters
    ///
    /// No padding is applied. `c` must be lower than the modulus.
    pub fn apply(&self, c: &BigUint) -> Result<BigUint, KeyError> {
        if c >= self.n() {
            return Err(KeyError::OutOfRange);
        }
        let m1 = c.modpow(&self.dp, &self.p);
        let m2 = c.modpow(&self.dq, &self.q);
        // h = qinv * (m1 - m2) mod p
        let h = (&self.qinv * ((m1 + &self.p - (&m2 % &self.p)) % &self.p)) % &self.p;
        Ok(m2 + h * &self.q)
    }
}

impl From<&RsaPrivateKey> for RsaPublicKey {
    fn from(key: &RsaPrivateKey) -> Self {
        key.to_public_key()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn big(v: u32) -> BigUint {
        BigUint::from(v)
    }

    fn textbook() -> RsaPrivateKey {
        RsaPrivateKey::from_components(big(3233), big(17), big(2753), big(61), big(53))
            .expect("valid key")
    }

    #[test]
    fn test_from_components() {
        let key = textbook();
        assert_eq!(key.dp(), &big(53));
        assert_eq!(key.dq(), &big(49));
        assert_eq!(key.qinv(), &big(38));
        assert_eq!(key.size(), 2);
    }

    #[test]
    fn test_from_primes() {
        let key = RsaPrivateKey::from_primes(big(61), big(53), big(17)).expect("valid key");
        assert_eq!(key.n(), &big(3233));
        assert_eq!(key.d(), &big(413));
        assert_eq!(
            RsaPrivateKey::from_primes(big(61), big(53), big(3)),
            Err(KeyError::KeyConsistencyFailure("public exponent is not invertible"))
        );
        assert!(RsaPrivateKey::from_primes(big(61), big(61), big(17)).is_err());
    }

    #[test]
    fn test_apply() {
        let key = textbook();
        let public = key.to_public_key();
        let c = public.apply(&big(65)).expect("in range");
        assert_eq!(c, big(2790));
        assert_eq!(key.apply(&c), Ok(big(65)));
        assert_eq!(public.apply(&big(3233)), Err(KeyError::OutOfRange));
        assert_eq!(key.apply(&big(4000)), Err(KeyError::OutOfRange));
    }

    #[test]
    fn test_inconsistent_parts() {
        let parts = |dp: u32, qinv: u32, n: u32| {
            RsaPrivateKey::from_parts(
                big(n),
                big(17),
                big(2753),
                big(61),
                big(53),
                big(dp),
                big(49),
                big(qinv),
            )
        };
        assert!(parts(53, 38, 3233).is_ok());
        assert_eq!(
            parts(54, 38, 3233),
            Err(KeyError::KeyConsistencyFailure("exponent1 is not d mod (p-1)"))
        );
        assert_eq!(
            parts(53, 39, 3233),
            Err(KeyError::KeyConsistencyFailure("coefficient is not q^-1 mod p"))
        );
        assert_eq!(
            parts(53, 38, 3234),
            Err(KeyError::KeyConsistencyFailure("modulus is not the product of the primes"))
        );
    }
}
