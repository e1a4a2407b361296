#[derive(Debug, Clone)]
pub struct TestCase {
    name: &'static str,
    group: TestGroup,
    file: TestFile,
}

impl TestCase {
    pub fn new(name: &'static str, group: TestGroup, file: TestFile) -> Self {
        Self { name, group, file }
    }

    pub fn small(name: &'static str, file: TestFile) -> Self {
        Self::new(name, TestGroup::Small, file)
    }

    pub fn normal(name: &'static str, file: TestFile) -> Self {
        Self::new(name, TestGroup::Normal, file)
    }

    pub fn large(name: &'static str, file: TestFile) -> Self {
        Self::new(name, TestGroup::Large, file)
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn group(&self) -> TestGroup {
        self.group
    }

    pub fn file(&self) -> &TestFile {
        &self.file
    }

    pub fn content_type(&self) -> &str {
        self.file().content_type()
    }
}

/// A generated request body together with the `Content-Type` it is sent with.
#[derive(Debug, Clone)]
pub struct TestFile {
    content_type: String,
    content: Vec<u8>,
}

impl TestFile {
    pub fn new(content_type: impl Into<String>, content: Vec<u8>) -> Self {
        Self { content_type: content_type.into(), content }
    }

    /// `multipart/form-data` body with `parts` parts, alternating text and binary, each
    /// carrying `part_size` bytes of content.
    pub fn multipart(parts: usize, part_size: usize) -> Self {
        const BOUNDARY: &str = "----bencher-boundary";

        let mut content = Vec::new();
        for index in 0..parts {
            content.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
            if index % 2 == 0 {
                content.extend_from_slice(format!("Content-Disposition: form-data; name=\"field{index}\"\r\n").as_bytes());
                content.extend_from_slice(b"Content-Type: text/plain; charset=UTF-8\r\n\r\n");
                content.extend(std::iter::repeat_n(b'a', part_size));
            } else {
                let disposition = format!("Content-Disposition: form-data; name=\"file{index}\"; filename=\"file{index}.bin\"\r\n");
                content.extend_from_slice(disposition.as_bytes());
                content.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
                // values that never form a delimiter
                content.extend((0..part_size).map(|i| [0x80, 0xFF, 0xC3, 0x9A][i % 4]));
            }
            content.extend_from_slice(b"\r\n");
        }
        content.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

        Self::new(format!("multipart/form-data; boundary={BOUNDARY}"), content)
    }

    /// `application/x-www-form-urlencoded` body with `fields` percent-encoded fields.
    pub fn form(fields: usize) -> Self {
        let content: Vec<String> = (0..fields).map(|index| format!("field{index}=value+{index}%2Fencoded")).collect();
        Self::new("application/x-www-form-urlencoded", content.join("&").into_bytes())
    }

    pub fn content(&self) -> &[u8] {
        &self.content
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }
}

#[derive(Clone, Copy, Debug)]
pub enum TestGroup {
    Small,
    Normal,
    Large,
}
