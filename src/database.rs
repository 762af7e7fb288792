//! The database backend behind [`DatabaseReader`](crate::DatabaseReader).

use std::fs;
use std::net::IpAddr;
use std::path::Path;

use ipnetwork::IpNetwork;
use log::debug;
use maxminddb::MaxMindDBError;
use serde_json::Value;

#[cfg(feature = "mmap")]
use memmap2::{Mmap, MmapOptions};
#[cfg(feature = "mmap")]
use std::fs::File;

use crate::error::GeoIp2Error;

/// A matched record and the network it covers.
#[derive(Clone, Debug, PartialEq)]
pub struct Lookup {
    /// The decoded record.
    pub record: Value,
    /// The narrowest network the database associates with the record, if the
    /// backend exposes it.
    pub network: Option<IpNetwork>,
}

/// An IP-to-record store with a declared database type.
pub trait Database {
    /// Database type from the metadata (e.g., "GeoIP2-City", "GeoLite2-ASN").
    fn database_type(&self) -> &str;

    /// Looks up `address`. `Ok(None)` means no network covers it.
    fn lookup(&self, address: IpAddr) -> Result<Option<Lookup>, GeoIp2Error>;
}

/// How a database file is held.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FileAccessMode {
    /// Read the whole file into memory.
    #[default]
    Memory,
    /// Memory map the file.
    #[cfg(feature = "mmap")]
    MemoryMapped,
}

/// Bytes of an opened database.
#[derive(Debug)]
pub enum Source {
    /// File contents read into memory.
    Memory(Vec<u8>),
    /// A memory-mapped file.
    #[cfg(feature = "mmap")]
    Mapped(Mmap),
}

impl Source {
    /// Opens `path` with the given access mode.
    pub fn open<P: AsRef<Path>>(path: P, mode: FileAccessMode) -> Result<Source, GeoIp2Error> {
        match mode {
            FileAccessMode::Memory => Ok(Source::Memory(fs::read(path)?)),
            #[cfg(feature = "mmap")]
            FileAccessMode::MemoryMapped => {
                let file = File::open(path)?;
                // The file must not be modified while mapped.
                let mmap = unsafe { MmapOptions::new().map(&file) }?;
                Ok(Source::Mapped(mmap))
            }
        }
    }
}

impl AsRef<[u8]> for Source {
    fn as_ref(&self) -> &[u8] {
        match self {
            Source::Memory(buf) => buf.as_slice(),
            #[cfg(feature = "mmap")]
            Source::Mapped(mmap) => &mmap[..],
        }
    }
}

impl<S: AsRef<[u8]>> Database for maxminddb::Reader<S> {
    fn database_type(&self) -> &str {
        &self.metadata.database_type
    }

    fn lookup(&self, address: IpAddr) -> Result<Option<Lookup>, GeoIp2Error> {
        match self.lookup_prefix::<Value>(address) {
            Ok((record, prefix_len)) => {
                let network = containing_network(address, prefix_len)?;
                debug!("{address} matched {network} in {}", self.metadata.database_type);
                Ok(Some(Lookup {
                    record,
                    network: Some(network),
                }))
            }
            Err(MaxMindDBError::AddressNotFoundError(_)) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

/// The network of `prefix_len` bits that contains `address`.
pub(crate) fn containing_network(
    address: IpAddr,
    prefix_len: usize,
) -> Result<IpNetwork, GeoIp2Error> {
    let prefix = u8::try_from(prefix_len)
        .map_err(|_| GeoIp2Error::invalid_input(format!("invalid prefix length {prefix_len}")))?;
    let network = IpNetwork::new(address, prefix)?;
    Ok(IpNetwork::new(network.network(), prefix)?)
}
