//! Brotli compression of the WOFF2 table data stream.

struct SliceReader<'a> {
    bytes: &'a [u8],
}

impl brotli::CustomRead<()> for SliceReader<'_> {
    fn read(&mut self, data: &mut [u8]) -> Result<usize, ()> {
        let len = self.bytes.len().min(data.len());
        let (head, tail) = self.bytes.split_at(len);
        data[..len].copy_from_slice(head);
        self.bytes = tail;
        Ok(len)
    }
}

#[derive(Default)]
struct VecWriter(Vec<u8>);

impl brotli::CustomWrite<()> for VecWriter {
    fn write(&mut self, data: &[u8]) -> Result<usize, ()> {
        self.0.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> Result<(), ()> {
        Ok(())
    }
}

#[derive(Debug, Clone)]
struct HeapSlice<T>(Box<[T]>);

impl<T> Default for HeapSlice<T> {
    fn default() -> Self {
        Self(Box::default())
    }
}

impl<T> brotli::SliceWrapper<T> for HeapSlice<T> {
    fn slice(&self) -> &[T] {
        self.0.as_ref()
    }

    fn len(&self) -> usize {
        self.0.len()
    }
}

impl<T> brotli::SliceWrapperMut<T> for HeapSlice<T> {
    fn slice_mut(&mut self) -> &mut [T] {
        self.0.as_mut()
    }
}

#[derive(Debug)]
struct HeapAlloc;

impl<T: Clone + Default> brotli::enc::Allocator<T> for HeapAlloc {
    type AllocatedMemory = HeapSlice<T>;

    fn alloc_cell(&mut self, len: usize) -> Self::AllocatedMemory {
        HeapSlice(vec![T::default(); len].into())
    }

    fn free_cell(&mut self, data: Self::AllocatedMemory) {
        drop(data);
    }
}

impl brotli::enc::BrotliAlloc for HeapAlloc {}

pub(super) fn compress(data: &[u8]) -> Vec<u8> {
    let mut output = VecWriter(Vec::with_capacity(data.len() / 2));
    ::brotli::BrotliCompressCustomIo(
        &mut SliceReader { bytes: data },
        &mut output,
        &mut [0_u8; 4_096],
        &mut [0_u8; 4_096],
        &::brotli::enc::BrotliEncoderParams::default(),
        HeapAlloc,
        &mut |_, _, _, _| { /* do nothing */ },
        (),
    )
    .expect("writing to Vec never fails");
    output.0
}

#[cfg(test)]
pub(super) fn decompress(data: &[u8]) -> Vec<u8> {
    let mut output = VecWriter::default();
    ::brotli::BrotliDecompressCustomIo(
        &mut SliceReader { bytes: data },
        &mut output,
        &mut [0_u8; 4_096],
        &mut [0_u8; 4_096],
        HeapAlloc,
        HeapAlloc,
        HeapAlloc,
        (),
    )
    .expect("decompressing a well-formed stream never fails");
    output.0
}

#[cfg(test)]
mod tests {
    use test_casing::test_casing;

    use super::*;

    #[test_casing(4, [0, 1, 1_000, 100_000])]
    #[allow(clippy::cast_possible_truncation)]
    fn compression_roundtrip(len: usize) {
        let data: Vec<u8> = (0..len).map(|i| (i % 251) as u8).collect();
        let compressed = compress(&data);
        assert_eq!(decompress(&compressed), data);
    }

    #[test]
    fn compressing_repetitive_data_shrinks_it() {
        let data = vec![0x42_u8; 10_000];
        let compressed = compress(&data);
        assert!(compressed.len() < data.len() / 10, "{}", compressed.len());
    }
}
