//! Incremental splitting of a streamed JSON array into its top-level objects.
//!
//! `streamGenerateContent` answers with one JSON array whose elements arrive in
//! arbitrary chunks. The splitter tracks brace depth outside of string literals
//! and hands back each element once its closing brace has been seen. It works on
//! bytes, so a multi-byte UTF-8 character split across two chunks is harmless.

/// Default buffer capacity for a single JSON object
const DEFAULT_JSON_BUFFER_CAPACITY: usize = 4096;

/// Splits a byte stream holding a JSON array of objects into the raw objects.
#[derive(Debug)]
pub struct JsonObjectSplitter {
    buffer: Vec<u8>,
    depth: usize,
    in_string: bool,
    escaped: bool,
}

impl Default for JsonObjectSplitter {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonObjectSplitter {
    /// Creates an empty splitter.
    pub fn new() -> Self {
        Self {
            buffer: Vec::with_capacity(DEFAULT_JSON_BUFFER_CAPACITY),
            depth: 0,
            in_string: false,
            escaped: false,
        }
    }

    /// Feeds a chunk and returns every object completed by it, in order.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<Vec<u8>> {
        let mut objects = Vec::new();

        for &byte in chunk {
            if self.depth == 0 {
                // Array brackets, commas and whitespace between elements.
                if byte == b'{' {
                    self.buffer.clear();
                    self.buffer.push(byte);
                    self.depth = 1;
                }
                continue;
            }

            self.buffer.push(byte);

            if self.in_string {
                if self.escaped {
                    self.escaped = false;
                } else if byte == b'\\' {
                    self.escaped = true;
                } else if byte == b'"' {
                    self.in_string = false;
                }
                continue;
            }

            match byte {
                b'"' => self.in_string = true,
                b'{' => self.depth += 1,
                b'}' => {
                    self.depth -= 1;
                    if self.depth == 0 {
                        objects.push(std::mem::replace(
                            &mut self.buffer,
                            Vec::with_capacity(DEFAULT_JSON_BUFFER_CAPACITY),
                        ));
                    }
                }
                _ => {}
            }
        }

        objects
    }

    /// Returns `true` if an object has been started but not yet closed.
    pub fn has_partial_object(&self) -> bool {
        self.depth > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn as_strings(objects: Vec<Vec<u8>>) -> Vec<String> {
        objects
            .into_iter()
            .map(|bytes| String::from_utf8(bytes).unwrap())
            .collect()
    }

    #[test]
    fn splits_array_in_one_chunk() {
        let mut splitter = JsonObjectSplitter::new();
        let objects = splitter.push(br#"[{"a":1},{"b":{"c":2}}]"#);
        assert_eq!(as_strings(objects), vec![r#"{"a":1}"#, r#"{"b":{"c":2}}"#]);
        assert!(!splitter.has_partial_object());
    }

    #[test]
    fn joins_objects_split_across_chunks() {
        let mut splitter = JsonObjectSplitter::new();
        assert!(splitter.push(b"[{\"text\": \"Hel").is_empty());
        assert!(splitter.has_partial_object());
        let objects = splitter.push(b"lo\"}\r\n,\r\n{\"text\": \"!\"}]");
        assert_eq!(
            as_strings(objects),
            vec![r#"{"text": "Hello"}"#, r#"{"text": "!"}"#]
        );
    }

    #[test]
    fn ignores_braces_and_escaped_quotes_inside_strings() {
        let mut splitter = JsonObjectSplitter::new();
        let input = br#"[{"text":"a } \" { b","n":"\\"}]"#;
        let objects = splitter.push(input);
        assert_eq!(objects.len(), 1);
        let value: serde_json::Value = serde_json::from_slice(&objects[0]).unwrap();
        assert_eq!(value["text"], "a } \" { b");
        assert_eq!(value["n"], "\\");
    }

    #[test]
    fn survives_utf8_sequences_split_between_chunks() {
        let text = "{\"text\":\"héllo\"}".as_bytes();
        let split = text.iter().position(|b| *b >= 0x80).unwrap() + 1;

        let mut splitter = JsonObjectSplitter::new();
        assert!(splitter.push(&text[..split]).is_empty());
        let objects = splitter.push(&text[split..]);
        assert_eq!(as_strings(objects), vec!["{\"text\":\"héllo\"}"]);
    }
}
