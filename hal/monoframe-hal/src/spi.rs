//! Serial bus abstractions
//!
//! The display controller is fed one byte at a time over a synchronous
//! serial bus. Transfers block until the byte has been clocked out.

/// Synchronous byte-wide transport
///
/// Implementations clock a single byte out on the bus and return once the
/// transfer is complete. There is no chip-select handling here; the select
/// line is driven separately through [`crate::gpio::OutputPin`].
pub trait ByteTransport {
    /// Error type for bus operations
    type Error;

    /// Transfer a single byte
    fn transfer(&mut self, byte: u8) -> Result<(), Self::Error>;

    /// Transfer a sequence of bytes in order
    fn write(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        for &byte in bytes {
            self.transfer(byte)?;
        }
        Ok(())
    }
}

impl<T: ByteTransport + ?Sized> ByteTransport for &mut T {
    type Error = T::Error;

    fn transfer(&mut self, byte: u8) -> Result<(), Self::Error> {
        (**self).transfer(byte)
    }

    fn write(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        (**self).write(bytes)
    }
}
