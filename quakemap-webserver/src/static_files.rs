//
// Copyright (c) Quakemap Contributors. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use std::collections::HashMap;

/// Viewer assets embedded into the binary
pub struct StaticFiles {
    files: HashMap<&'static str, (&'static [u8], &'static str)>,
}

impl StaticFiles {
    pub fn init() -> StaticFiles {
        let mut static_files = StaticFiles {
            files: HashMap::new(),
        };
        static_files.add(
            "index.html",
            include_bytes!("static/index.html"),
            "text/html",
        );
        static_files.add(
            "viewer.js",
            include_bytes!("static/viewer.js"),
            "application/javascript",
        );
        static_files.add(
            "viewer.css",
            include_bytes!("static/viewer.css"),
            "text/css",
        );
        static_files
    }
    fn add(&mut self, name: &'static str, data: &'static [u8], media_type: &'static str) {
        self.files.insert(name, (data, media_type));
    }
    /// Content and media type of `name`, `index.html` for the root path
    pub fn content(&self, name: &str) -> Option<&(&'static [u8], &'static str)> {
        let key = if name.is_empty() { "index.html" } else { name };
        self.files.get(key)
    }
}

#[test]
fn test_content() {
    let files = StaticFiles::init();
    let (data, media_type) = files.content("").unwrap();
    assert_eq!(*media_type, "text/html");
    assert!(std::str::from_utf8(data).unwrap().contains("viewer.js"));
    assert_eq!(files.content("viewer.css").unwrap().1, "text/css");
    assert!(files.content("maputnik.html").is_none());
}
