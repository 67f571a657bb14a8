use std::io::BufRead;
use std::io::BufReader;
use std::io::Read;

use streaming_iterator::StreamingIterator;

/// A lending iterator over the lines of a type implementing Read.
///
/// Reading stops at the first error, which can be obtained with
/// [LineIterator::take_error].
pub struct LineIterator<T: Read> {
    reader: BufReader<T>,
    buffer: String,
    end: bool,
    error: Option<std::io::Error>,
}

impl<T: Read> LineIterator<T> {
    pub fn new(reader: T) -> LineIterator<T> {
        LineIterator {
            reader: BufReader::new(reader),
            buffer: String::new(),
            end: false,
            error: None,
        }
    }

    /// Returns the error that ended the iteration, if any.
    pub fn take_error(&mut self) -> Option<std::io::Error> {
        self.error.take()
    }
}

impl<T: Read> StreamingIterator for LineIterator<T> {
    type Item = String;

    fn advance(&mut self) {
        self.buffer.clear();
        match self.reader.read_line(&mut self.buffer) {
            Ok(n) if n > 0 => {
                if self.buffer.ends_with('\n') {
                    self.buffer.pop();
                    if self.buffer.ends_with('\r') {
                        self.buffer.pop();
                    }
                }
            }
            Ok(_) => self.end = true,
            Err(error) => {
                self.end = true;
                self.error = Some(error);
            }
        }
    }

    fn get(&self) -> Option<&Self::Item> {
        if self.end {
            None
        } else {
            Some(&self.buffer)
        }
    }
}
