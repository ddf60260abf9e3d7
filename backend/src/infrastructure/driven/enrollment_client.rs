use std::time::Duration;
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Serialize;
use url::Url;
use crate::application::ports::{EnrollmentError, EnrollmentService};
use crate::domain::value_objects::{CourseRunId, UserId};

#[derive(Debug, Serialize)]
struct UnenrollRequest<'a> {
    user: String,
    course_id: &'a str,
    skip_refund: bool,
}

/// Enrollment collaborator reached over the LMS enrollment API
pub struct HttpEnrollmentService {
    client: reqwest::Client,
    unenroll_url: Url,
    api_token: Option<String>,
}

impl HttpEnrollmentService {
    pub fn new(base_url: &str, api_token: Option<String>, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            unenroll_url: unenroll_url(base_url)?,
            api_token,
        })
    }
}

fn unenroll_url(base_url: &str) -> anyhow::Result<Url> {
    let base = Url::parse(&format!("{}/", base_url.trim_end_matches('/')))?;
    Ok(base.join("api/enrollment/v1/unenroll/")?)
}

#[async_trait]
impl EnrollmentService for HttpEnrollmentService {
    async fn unenroll(
        &self,
        user: &UserId,
        course_run: &CourseRunId,
        skip_refund: bool,
    ) -> Result<(), EnrollmentError> {
        let body = UnenrollRequest {
            user: user.to_string(),
            course_id: course_run.as_str(),
            skip_refund,
        };
        let mut request = self.client.post(self.unenroll_url.clone()).json(&body);
        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| EnrollmentError::Unavailable(e.to_string()))?;

        match response.status() {
            status if status.is_success() => Ok(()),
            StatusCode::NOT_FOUND => Err(EnrollmentError::NotEnrolled {
                user: *user,
                course_run: course_run.clone(),
            }),
            status => {
                let detail = response.text().await.unwrap_or_default();
                Err(EnrollmentError::Unavailable(format!("{status}: {detail}")))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unenroll_url_tolerates_trailing_slash() {
        assert_eq!(
            unenroll_url("http://lms.local:8000").unwrap().as_str(),
            "http://lms.local:8000/api/enrollment/v1/unenroll/"
        );
        assert_eq!(
            unenroll_url("http://lms.local:8000/").unwrap().as_str(),
            "http://lms.local:8000/api/enrollment/v1/unenroll/"
        );
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        assert!(HttpEnrollmentService::new("not a url", None, Duration::from_secs(1)).is_err());
    }

    #[tokio::test]
    async fn test_unreachable_service_is_unavailable() {
        // Port 9 (discard) is closed on test hosts.
        let service = HttpEnrollmentService::new("http://127.0.0.1:9", None, Duration::from_millis(500)).unwrap();
        let err = service
            .unenroll(&UserId::new(), &CourseRunId::new("run-1").unwrap(), true)
            .await
            .unwrap_err();
        assert!(matches!(err, EnrollmentError::Unavailable(_)));
    }
}
