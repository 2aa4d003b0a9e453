use std::fmt::{Display, Formatter};

/// Sizes before and after one compression or decompression run, for the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Report {
    pub bytes_in: u64,
    pub bytes_out: u64,
}

impl Report {
    /// Output size as a fraction of input size. An empty input reports 0.
    pub fn ratio(&self) -> f64 {
        if self.bytes_in == 0 {
            return 0.0;
        }
        self.bytes_out as f64 / self.bytes_in as f64
    }

    /// Output bits spent per input byte.
    pub fn bits_per_byte(&self) -> f64 {
        self.ratio() * 8.0
    }
}

impl Display for Report {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} -> {} bytes, ratio {:.3} ({:.3} bits/byte)",
            self.bytes_in,
            self.bytes_out,
            self.ratio(),
            self.bits_per_byte()
        )
    }
}

#[test]
fn report_test() {
    let r = Report {
        bytes_in: 1000,
        bytes_out: 250,
    };
    assert_eq!(r.to_string(), "1000 -> 250 bytes, ratio 0.250 (2.000 bits/byte)");
    let empty = Report {
        bytes_in: 0,
        bytes_out: 1,
    };
    assert_eq!(empty.ratio(), 0.0);
}
