// Request descriptors.
//
// An `ApiRequest` is plain data: method, path below the API root, query
// pairs, and a body. `ApiClient::send` turns it into a reqwest call.

use bytes::Bytes;
use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

use crate::error::Error;

/// A file part of a multipart form.
#[derive(Debug, Clone)]
pub struct FilePart {
    pub field: String,
    pub file_name: String,
    pub mime: Option<String>,
    pub bytes: Bytes,
}

/// A `multipart/form-data` body: text fields plus file parts.
#[derive(Debug, Clone, Default)]
pub struct MultipartBody {
    pub fields: Vec<(String, String)>,
    pub files: Vec<FilePart>,
}

impl MultipartBody {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a text field. Empty values are skipped, matching how the
    /// backend treats absent form fields.
    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let value = value.into();
        if !value.is_empty() {
            self.fields.push((name.into(), value));
        }
        self
    }

    /// Append a text field when `value` is `Some`.
    pub fn opt_text(self, name: impl Into<String>, value: Option<impl ToString>) -> Self {
        match value {
            Some(v) => self.text(name, v.to_string()),
            None => self,
        }
    }

    pub fn file(mut self, part: FilePart) -> Self {
        self.files.push(part);
        self
    }

    pub(crate) fn into_form(self) -> Result<reqwest::multipart::Form, Error> {
        let mut form = reqwest::multipart::Form::new();
        for (name, value) in self.fields {
            form = form.text(name, value);
        }
        for file in self.files {
            let mut part =
                reqwest::multipart::Part::bytes(file.bytes.to_vec()).file_name(file.file_name);
            if let Some(mime) = file.mime {
                part = part
                    .mime_str(&mime)
                    .map_err(|e| Error::InvalidRequest(format!("bad mime type {mime:?}: {e}")))?;
            }
            form = form.part(file.field, part);
        }
        Ok(form)
    }
}

/// Request payload.
#[derive(Debug, Clone, Default)]
pub enum RequestBody {
    #[default]
    Empty,
    Json(Value),
    Multipart(MultipartBody),
}

/// A fully described request relative to the API root.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub segments: Vec<String>,
    pub query: Vec<(String, String)>,
    pub body: RequestBody,
}

impl ApiRequest {
    pub fn new<I, S>(method: Method, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            method,
            segments: segments.into_iter().map(Into::into).collect(),
            query: Vec::new(),
            body: RequestBody::Empty,
        }
    }

    pub fn get<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(Method::GET, segments)
    }

    /// Serialize `params` into query pairs.
    ///
    /// `params` must serialize to a flat JSON object; `null` values are
    /// dropped so optional filters simply disappear from the URL.
    pub fn query<Q: Serialize + ?Sized>(mut self, params: &Q) -> Result<Self, Error> {
        let value = serde_json::to_value(params)
            .map_err(|e| Error::InvalidRequest(format!("query not serializable: {e}")))?;
        match value {
            Value::Null => {}
            Value::Object(map) => {
                for (key, v) in map {
                    match v {
                        Value::Null => {}
                        Value::String(s) => self.query.push((key, s)),
                        other => self.query.push((key, other.to_string())),
                    }
                }
            }
            other => {
                return Err(Error::InvalidRequest(format!(
                    "query must be an object, got {other}"
                )));
            }
        }
        Ok(self)
    }

    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, Error> {
        let value = serde_json::to_value(body)
            .map_err(|e| Error::InvalidRequest(format!("body not serializable: {e}")))?;
        self.body = RequestBody::Json(value);
        Ok(self)
    }

    pub fn multipart(mut self, body: MultipartBody) -> Self {
        self.body = RequestBody::Multipart(body);
        self
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    struct Filter {
        shop_id: Option<String>,
        employee_id: Option<String>,
    }

    #[test]
    fn query_drops_null_fields() {
        let req = ApiRequest::get(["rotas"])
            .query(&Filter {
                shop_id: Some("s1".into()),
                employee_id: None,
            })
            .unwrap();
        assert_eq!(req.query, vec![("shopId".to_owned(), "s1".to_owned())]);
    }

    #[test]
    fn query_stringifies_scalars() {
        let req = ApiRequest::get(["x"])
            .query(&json!({ "page": 2, "active": true }))
            .unwrap();
        assert!(req.query.contains(&("page".to_owned(), "2".to_owned())));
        assert!(req.query.contains(&("active".to_owned(), "true".to_owned())));
    }

    #[test]
    fn query_rejects_non_objects() {
        let err = ApiRequest::get(["x"]).query(&json!([1, 2])).unwrap_err();
        assert!(matches!(err, Error::InvalidRequest(_)));
    }

    #[test]
    fn multipart_skips_empty_text() {
        let body = MultipartBody::new()
            .text("name", "Corner Shop")
            .text("site", "")
            .opt_text("rent", Some(1200))
            .opt_text("bills", None::<u32>);
        assert_eq!(
            body.fields,
            vec![
                ("name".to_owned(), "Corner Shop".to_owned()),
                ("rent".to_owned(), "1200".to_owned()),
            ]
        );
    }
}
