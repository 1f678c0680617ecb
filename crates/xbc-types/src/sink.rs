/// Append-only byte destination.
///
/// Serializers write canonical bytes into a sink; hashers implement the same
/// trait so an object can be streamed straight into a digest without an
/// intermediate buffer.
pub trait BytesSink {
    /// Append `bytes` to the sink.
    fn put(&mut self, bytes: &[u8]);
}

impl BytesSink for Vec<u8> {
    fn put(&mut self, bytes: &[u8]) {
        self.extend_from_slice(bytes);
    }
}

impl<S: BytesSink + ?Sized> BytesSink for &mut S {
    fn put(&mut self, bytes: &[u8]) {
        (**self).put(bytes);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_twice(sink: &mut dyn BytesSink, bytes: &[u8]) {
        sink.put(bytes);
        sink.put(bytes);
    }

    #[test]
    fn vec_sink_appends() {
        let mut buf = vec![0xAA];
        write_twice(&mut buf, &[1, 2]);
        assert_eq!(buf, vec![0xAA, 1, 2, 1, 2]);
    }
}
