use super::{
    PrivateKeyParts, PublicKeyParts, RsaPrivateKey, RsaPublicKey, PKCS1_PRIVATE_LABEL, PKCS1_PUBLIC_LABEL,
    PRIVATE_KEY_LABEL, PUBLIC_KEY_LABEL,
};
use crate::ber::{BerObject, Tag};
use crate::error::SerializeResult;
use crate::oid::OID_PKCS1_RSAENCRYPTION;
use crate::pem::{self, EncodeConfig, Pem, DEFAULT_ENCODING_CONFIG};

fn rsa_algorithm_identifier() -> BerObject<'static> {
    BerObject::from_seq(vec![BerObject::from_oid(OID_PKCS1_RSAENCRYPTION), BerObject::null()])
}

fn to_pem(label: &str, der: Vec<u8>, config: EncodeConfig) -> String {
    pem::encode_config(&Pem::new(label, der), config)
}

impl RsaPublicKey {
    fn rsa_public_key_object(&self) -> BerObject<'static> {
        BerObject::from_seq(vec![BerObject::from_biguint(self.n()), BerObject::from_biguint(self.e())])
    }

    /// Encode as a PKCS#1 `RSAPublicKey`
    pub fn to_pkcs1_der(&self) -> SerializeResult<Vec<u8>> {
        self.rsa_public_key_object().to_vec()
    }

    /// Encode as a `SubjectPublicKeyInfo`
    pub fn to_public_key_der(&self) -> SerializeResult<Vec<u8>> {
        let spki = BerObject::from_seq(vec![
            rsa_algorithm_identifier(),
            BerObject::encapsulating(Tag::BitString, self.rsa_public_key_object())?,
        ]);
        spki.to_vec()
    }

    /// Encode as a PEM `RSA PUBLIC KEY`
    pub fn to_pkcs1_pem(&self) -> SerializeResult<String> {
        self.to_pkcs1_pem_with_config(DEFAULT_ENCODING_CONFIG)
    }

    pub fn to_pkcs1_pem_with_config(&self, config: EncodeConfig) -> SerializeResult<String> {
        Ok(to_pem(PKCS1_PUBLIC_LABEL, self.to_pkcs1_der()?, config))
    }

    /// Encode as a PEM `PUBLIC KEY`
    pub fn to_public_key_pem(&self) -> SerializeResult<String> {
        self.to_public_key_pem_with_config(DEFAULT_ENCODING_CONFIG)
    }

    pub fn to_public_key_pem_with_config(&self, config: EncodeConfig) -> SerializeResult<String> {
        Ok(to_pem(PUBLIC_KEY_LABEL, self.to_public_key_der()?, config))
    }
}

impl RsaPrivateKey {
    fn rsa_private_key_object(&self) -> BerObject<'static> {
        let fields = [
            self.n(),
            self.e(),
            self.d(),
            self.p(),
            self.q(),
            self.dp(),
            self.dq(),
            self.qinv(),
        ];
        let mut v = Vec::with_capacity(9);
        // version 0: two primes
        v.push(BerObject::from_u64(0));
        v.extend(fields.iter().map(|f| BerObject::from_biguint(f)));
        BerObject::from_seq(v)
    }

    /// Encode as a PKCS#1 `RSAPrivateKey`
    pub fn to_pkcs1_der(&self) -> SerializeResult<Vec<u8>> {
        self.rsa_private_key_object().to_vec()
    }

    /// Encode as an unencrypted PKCS#8 `PrivateKeyInfo`
    pub fn to_pkcs8_der(&self) -> SerializeResult<Vec<u8>> {
        let info = BerObject::from_seq(vec![
            BerObject::from_u64(0),
            rsa_algorithm_identifier(),
            BerObject::encapsulating(Tag::OctetString, self.rsa_private_key_object())?,
        ]);
        info.to_vec()
    }

    /// Encode as a PEM `RSA PRIVATE KEY`
    pub fn to_pkcs1_pem(&self) -> SerializeResult<String> {
        self.to_pkcs1_pem_with_config(DEFAULT_ENCODING_CONFIG)
    }

    pub fn to_pkcs1_pem_with_config(&self, config: EncodeConfig) -> SerializeResult<String> {
        Ok(to_pem(PKCS1_PRIVATE_LABEL, self.to_pkcs1_der()?, config))
    }

    /// Encode as a PEM `PRIVATE KEY`
    pub fn to_pkcs8_pem(&self) -> SerializeResult<String> {
        self.to_pkcs8_pem_with_config(DEFAULT_ENCODING_CONFIG)
    }

    pub fn to_pkcs8_pem_with_config(&self, config: EncodeConfig) -> SerializeResult<String> {
        Ok(to_pem(PRIVATE_KEY_LABEL, self.to_pkcs8_der()?, config))
    }
}
