#[cfg(feature = "binary")]
use flate2::{read::ZlibDecoder, write::ZlibEncoder, Compression};

macro_rules! impl_read_write {
    ($struct:ty) => {
        #[cfg(feature = "json")]
        impl $struct {
            pub fn to_json<W>(&self, writer: W) -> Result<(), serde_json::Error>
            where
                W: std::io::Write,
            {
                serde_json::to_writer(writer, self)
            }

            pub fn from_json<R>(reader: R) -> Result<Self, serde_json::Error>
            where
                R: std::io::Read,
            {
                serde_json::from_reader(reader)
            }
        }

        #[cfg(feature = "binary")]
        impl $struct {
            /// Writes zlib-compressed CBOR.
            pub fn to_binary<W>(&self, writer: W) -> Result<(), serde_cbor::Error>
            where
                W: std::io::Write,
            {
                let writer = ZlibEncoder::new(writer, Compression::default());
                serde_cbor::to_writer(writer, self)
            }

            pub fn from_binary<R>(reader: R) -> Result<Self, serde_cbor::Error>
            where
                R: std::io::Read,
            {
                let reader = ZlibDecoder::new(reader);

                serde_cbor::from_reader(reader)
            }
        }
    };
}

impl_read_write!(crate::prelude::NamedGraph);
