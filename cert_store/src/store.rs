use crate::tag::{take, write_tag, TagId, TagReader, TAG_HEADER_LEN};
use crate::{StoreError, StoreResult};
use log::{debug, info};

/// File version, application version, id width, length width
pub const HEADER: [u8; 12] = [
    0x00, 0x00, 0x10, 0x00, // file version
    0x05, 0x05, 0x00, 0x23, // application version
    0x00, 0x01, // bytes per tag id
    0x00, 0x04, // bytes per tag length
];

/// Payload of the type tag marking a certificate authority
pub const CA_TYPE: [u8; 4] = [0x00, 0x00, 0x00, 0x01];

/// The parts of a certificate that end up in the store
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Certificate {
    /// Subject common name
    pub common_name: String,
    /// DER encoded subject
    pub raw_subject: Vec<u8>,
    /// The whole DER encoded certificate
    pub raw: Vec<u8>,
}

impl Certificate {
    pub fn new<S: Into<String>>(common_name: S, raw_subject: Vec<u8>, raw: Vec<u8>) -> Self {
        Certificate {
            common_name: common_name.into(),
            raw_subject,
            raw,
        }
    }

    /// The certificate is also written into the image, which has room for
    /// [`CertificateStore::MAX_CERTIFICATE_LEN`] bytes.
    pub fn check_embeddable(&self) -> StoreResult<()> {
        if self.raw.len() > CertificateStore::MAX_CERTIFICATE_LEN {
            return Err(StoreError::CertificateTooLarge {
                len: self.raw.len(),
                max: CertificateStore::MAX_CERTIFICATE_LEN,
            });
        }
        Ok(())
    }
}

/// A store holding a single CA certificate
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CertificateStore {
    pub certificate: Certificate,
}

impl CertificateStore {
    pub const MAX_CERTIFICATE_LEN: usize = 928;

    pub fn new(certificate: Certificate) -> Self {
        CertificateStore { certificate }
    }

    fn payload_len(&self) -> usize {
        let certificate = &self.certificate;
        4 * TAG_HEADER_LEN
            + CA_TYPE.len()
            + certificate.common_name.len()
            + certificate.raw_subject.len()
            + certificate.raw.len()
    }

    /// Size of [`Self::to_bytes`]
    pub fn encoded_len(&self) -> usize {
        HEADER.len() + TAG_HEADER_LEN + self.payload_len()
    }

    pub fn to_bytes(&self) -> StoreResult<Vec<u8>> {
        let certificate = &self.certificate;

        let mut payload = Vec::with_capacity(self.payload_len());
        write_tag(&mut payload, TagId::CertificateType, &CA_TYPE)?;
        write_tag(&mut payload, TagId::CertificateName, certificate.common_name.as_bytes())?;
        write_tag(&mut payload, TagId::CertificateSubject, &certificate.raw_subject)?;
        write_tag(&mut payload, TagId::CertificateContents, &certificate.raw)?;

        let mut out = Vec::with_capacity(self.encoded_len());
        out.extend_from_slice(&HEADER);
        write_tag(&mut out, TagId::CaCertificate, &payload)?;

        info!(
            "Built certificate store for {}, {} bytes",
            certificate.common_name,
            out.len()
        );
        Ok(out)
    }

    /// Reads a store back. Anything after the CA certificate tag is ignored.
    pub fn parse(bytes: &[u8]) -> StoreResult<CertificateStore> {
        let header = take(bytes, HEADER.len())?;
        if header != HEADER {
            return Err(StoreError::UnsupportedHeader(header.to_vec()));
        }

        let mut outer = TagReader::new(&bytes[HEADER.len()..]);
        let ca = outer.expect(TagId::CaCertificate)?;
        if !outer.remaining().is_empty() {
            debug!("Ignoring {} trailing bytes", outer.remaining().len());
        }

        let mut inner = TagReader::new(ca.payload);
        let kind = inner.expect(TagId::CertificateType)?;
        if kind.payload != CA_TYPE {
            return Err(StoreError::UnsupportedType(kind.payload.to_vec()));
        }
        let name = inner.expect(TagId::CertificateName)?;
        let subject = inner.expect(TagId::CertificateSubject)?;
        let contents = inner.expect(TagId::CertificateContents)?;

        let common_name =
            String::from_utf8(name.payload.to_vec()).map_err(|_| StoreError::InvalidName)?;
        Ok(CertificateStore::new(Certificate::new(
            common_name,
            subject.payload.to_vec(),
            contents.payload.to_vec(),
        )))
    }
}
