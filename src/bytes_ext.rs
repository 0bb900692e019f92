pub trait WriteBytesExt: std::io::Write {
    #[inline]
    fn write_u8(&mut self, v: u8) -> std::io::Result<()> {
        self.write_all(&[v])
    }

    #[inline]
    fn write_le_u16(&mut self, v: u16) -> std::io::Result<()> {
        self.write_all(&v.to_le_bytes())
    }

    #[inline]
    fn write_le_u32(&mut self, v: u32) -> std::io::Result<()> {
        self.write_all(&v.to_le_bytes())
    }
}

impl<W: std::io::Write> WriteBytesExt for W {}
