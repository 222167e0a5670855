//! Multipart encoding of torrent-add requests.

use qbit_types::{QbitError, TorrentAddRequest, TorrentBuffer};
use reqwest::multipart::Part;

/// A multipart form body, kept inspectable until the transport renders it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct MultipartForm {
    parts: Vec<FormPart>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FormPart {
    pub(crate) name: String,
    pub(crate) value: PartValue,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PartValue {
    Text(String),
    File {
        bytes: Vec<u8>,
        filename: String,
        content_type: String,
    },
}

impl MultipartForm {
    pub(crate) fn text(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.parts.push(FormPart {
            name: name.into(),
            value: PartValue::Text(value.into()),
        });
    }

    pub(crate) fn file(
        &mut self,
        name: impl Into<String>,
        bytes: Vec<u8>,
        filename: impl Into<String>,
        content_type: impl Into<String>,
    ) {
        self.parts.push(FormPart {
            name: name.into(),
            value: PartValue::File {
                bytes,
                filename: filename.into(),
                content_type: content_type.into(),
            },
        });
    }

    #[cfg(test)]
    pub(crate) fn parts(&self) -> &[FormPart] {
        &self.parts
    }

    pub(crate) fn into_parts(self) -> Vec<FormPart> {
        self.parts
    }

    /// Value of the first text field called `name`.
    #[cfg(test)]
    pub(crate) fn text_value(&self, name: &str) -> Option<&str> {
        self.parts.iter().find_map(|part| match &part.value {
            PartValue::Text(text) if part.name == name => Some(text.as_str()),
            _ => None,
        })
    }
}

/// Build the `torrents/add` body.
///
/// Fails before doing any work when the request names neither URLs nor torrent files.
pub(crate) fn encode(request: TorrentAddRequest) -> Result<MultipartForm, QbitError> {
    if !request.has_sources() {
        return Err(QbitError::Validation(
            "either urls or torrents must be provided".into(),
        ));
    }

    let mut form = MultipartForm::default();

    if let Some(urls) = request.urls.filter(|urls| !urls.is_empty()) {
        form.text("urls", urls.joined());
    }

    for (index, torrent) in request.torrents.into_iter().enumerate() {
        let filename = torrent
            .filename
            .unwrap_or_else(|| format!("torrent_{index}.torrent"));
        check_content_type(&torrent.content_type)?;
        form.file(
            "torrents",
            normalize(torrent.buffer),
            filename,
            torrent.content_type,
        );
    }

    if let Some(savepath) = request.savepath {
        form.text("savepath", savepath);
    }
    if let Some(category) = request.category {
        form.text("category", category);
    }
    if let Some(paused) = request.paused {
        form.text("paused", paused.to_string());
    }
    if let Some(skip_checking) = request.skip_checking {
        form.text("skip_checking", skip_checking.to_string());
    }
    if let Some(rename) = request.rename {
        form.text("rename", rename);
    }
    if let Some(up_limit) = request.up_limit {
        form.text("upLimit", up_limit.to_string());
    }
    if let Some(dl_limit) = request.dl_limit {
        form.text("dlLimit", dl_limit.to_string());
    }

    Ok(form)
}

/// Rejects media types the multipart encoder would refuse later.
fn check_content_type(content_type: &str) -> Result<(), QbitError> {
    Part::text("")
        .mime_str(content_type)
        .map(drop)
        .map_err(|e| QbitError::Validation(format!("invalid content type {content_type:?}: {e}")))
}

/// Copies any buffer shape into owned bytes.
fn normalize(buffer: TorrentBuffer) -> Vec<u8> {
    match buffer {
        TorrentBuffer::Text(text) => text.into_bytes(),
        TorrentBuffer::Fixed(bytes) => bytes.into_vec(),
        TorrentBuffer::Growable(bytes) => bytes,
        // Other owners may still hold the allocation.
        TorrentBuffer::Shared(bytes) => bytes.to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use qbit_types::{DEFAULT_TORRENT_CONTENT_TYPE, TorrentFile, UrlSource};

    use super::*;

    const CONTENT: &[u8] = b"d8:announce0:4:infod4:name4:teste";

    fn file_parts(form: &MultipartForm) -> Vec<(&str, &[u8], &str, &str)> {
        form.parts()
            .iter()
            .filter_map(|part| match &part.value {
                PartValue::File {
                    bytes,
                    filename,
                    content_type,
                } => Some((
                    part.name.as_str(),
                    bytes.as_slice(),
                    filename.as_str(),
                    content_type.as_str(),
                )),
                PartValue::Text(_) => None,
            })
            .collect()
    }

    #[test]
    fn empty_request_is_rejected() {
        let err = encode(TorrentAddRequest::default()).unwrap_err();
        assert!(matches!(err, QbitError::Validation(_)));

        let err = encode(TorrentAddRequest::from_urls(UrlSource::Many(vec![]))).unwrap_err();
        assert!(matches!(err, QbitError::Validation(_)));
    }

    #[test]
    fn every_buffer_shape_encodes_the_same() {
        let text = String::from_utf8(CONTENT.to_vec()).unwrap();
        let shared: Arc<[u8]> = Arc::from(CONTENT);
        let fixed: Box<[u8]> = Box::from(CONTENT);
        let request = TorrentAddRequest::from_torrents(vec![
            TorrentFile::new(text).with_filename("a.torrent"),
            TorrentFile::new(fixed).with_filename("a.torrent"),
            TorrentFile::new(CONTENT.to_vec()).with_filename("a.torrent"),
            TorrentFile::new(shared).with_filename("a.torrent"),
        ]);

        let form = encode(request).unwrap();
        let parts = file_parts(&form);

        assert_eq!(parts.len(), 4);
        for part in &parts {
            assert_eq!(
                *part,
                ("torrents", CONTENT, "a.torrent", DEFAULT_TORRENT_CONTENT_TYPE)
            );
        }
    }

    #[test]
    fn unnamed_files_get_positional_names() {
        let request = TorrentAddRequest::from_torrents(vec![
            TorrentFile::new(CONTENT.to_vec()),
            TorrentFile::new(CONTENT.to_vec()),
        ]);

        let form = encode(request).unwrap();
        let names: Vec<_> = file_parts(&form).iter().map(|part| part.2).collect();
        assert_eq!(names, ["torrent_0.torrent", "torrent_1.torrent"]);
    }

    #[test]
    fn declared_content_type_is_kept() {
        let request = TorrentAddRequest::from_torrents(vec![
            TorrentFile::new("d4:infoe").with_content_type("application/octet-stream"),
        ]);

        let form = encode(request).unwrap();
        assert_eq!(file_parts(&form)[0].3, "application/octet-stream");
    }

    #[test]
    fn url_list_becomes_one_field() {
        let request = TorrentAddRequest::from_urls(vec![
            "magnet:?xt=urn:btih:aaaa",
            "https://example.org/b.torrent",
        ]);

        let form = encode(request).unwrap();
        assert_eq!(form.parts().len(), 1);
        assert_eq!(
            form.text_value("urls"),
            Some("magnet:?xt=urn:btih:aaaa\nhttps://example.org/b.torrent")
        );
    }

    #[test]
    fn unset_options_are_omitted() {
        let form = encode(TorrentAddRequest::from_urls("magnet:?xt=urn:btih:aaaa")).unwrap();
        for name in [
            "savepath",
            "category",
            "paused",
            "skip_checking",
            "rename",
            "upLimit",
            "dlLimit",
        ] {
            assert_eq!(form.text_value(name), None, "{name} should be omitted");
        }
    }

    #[test]
    fn set_options_are_stringified() {
        let request = TorrentAddRequest {
            savepath: Some("/downloads".into()),
            category: Some("linux".into()),
            paused: Some(true),
            skip_checking: Some(false),
            rename: Some("debian".into()),
            up_limit: Some(1024),
            dl_limit: Some(0),
            ..TorrentAddRequest::from_urls("magnet:?xt=urn:btih:aaaa")
        };

        let form = encode(request).unwrap();
        assert_eq!(form.text_value("savepath"), Some("/downloads"));
        assert_eq!(form.text_value("category"), Some("linux"));
        assert_eq!(form.text_value("paused"), Some("true"));
        assert_eq!(form.text_value("skip_checking"), Some("false"));
        assert_eq!(form.text_value("rename"), Some("debian"));
        assert_eq!(form.text_value("upLimit"), Some("1024"));
        assert_eq!(form.text_value("dlLimit"), Some("0"));
    }

    #[test]
    fn urls_and_files_together() {
        let request = TorrentAddRequest {
            torrents: vec![TorrentFile::new(CONTENT.to_vec())],
            ..TorrentAddRequest::from_urls("magnet:?xt=urn:btih:aaaa")
        };

        let form = encode(request).unwrap();
        assert_eq!(form.text_value("urls"), Some("magnet:?xt=urn:btih:aaaa"));
        assert_eq!(file_parts(&form).len(), 1);
    }

    #[test]
    fn malformed_content_type_is_rejected() {
        let request = TorrentAddRequest::from_torrents(vec![
            TorrentFile::new(CONTENT.to_vec()).with_content_type("not a mime type"),
        ]);

        match encode(request).unwrap_err() {
            QbitError::Validation(msg) => assert!(msg.contains("not a mime type")),
            other => panic!("Expected Validation error, got {other:?}"),
        }
    }
}
