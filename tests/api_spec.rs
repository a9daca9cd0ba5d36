use speculate2::speculate;

speculate! {
    use std::sync::Arc;

    use axum::http::{HeaderName, HeaderValue, StatusCode};
    use axum_test::TestServer;
    use serde_json::Value;
    use tempfile::TempDir;

    use roadmap_core::engine::ValidationReport;
    use roadmap_core::models::StoredRoadmap;
    use roadmap_core::FileStore;
    use roadmap_visualizer::api::{create_router, BatchResponse, DependenciesResponse, DependentsResponse};

    const IDENTITY: &str = r#"
roadmap:
  name: Identity
  service_line: Platform
  owner: team-identity
  items:
    - id: sso
      name: Single sign-on
      start: 2025-Q1
      end: 2025-Q2
      status: in-progress
"#;

    const PAYMENTS: &str = r#"
roadmap:
  name: Payments
  service_line: Commerce
  items:
    - id: design
      name: Design
      start: 2025-Q1
      end: 2025-Q1
      status: completed
    - id: checkout
      name: Checkout
      start: 2025-Q2
      end: 2025-Q3
      status: planned
      dependencies: [design]
      external_dependencies:
        - roadmap: Identity
          item: sso
          criticality: high
        - roadmap: Identity
          item: mfa
"#;

    fn setup() -> (TempDir, TestServer) {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let store = FileStore::open(dir.path()).expect("Failed to open store");
        let server = TestServer::new(create_router(Arc::new(store))).expect("Failed to start test server");
        (dir, server)
    }

    fn block_on<F: std::future::Future>(future: F) -> F::Output {
        tokio_test::block_on(future)
    }

    async fn upload(server: &TestServer, yaml: &str) -> StoredRoadmap {
        let response = server.post("/api/roadmaps").text(yaml).await;
        response.assert_status(StatusCode::CREATED);
        response.json::<StoredRoadmap>()
    }

    describe "health endpoints" {
        it "answers health and readiness probes" {
            block_on(async {
                let (_dir, server) = setup();
                assert_eq!(server.get("/health").await.text(), "OK");
                assert_eq!(server.get("/ready").await.text(), "READY");
            });
        }
    }

    describe "roadmap upload" {
        it "stores a valid roadmap and returns it" {
            block_on(async {
                let (_dir, server) = setup();
                let stored = upload(&server, IDENTITY).await;

                assert_eq!(stored.roadmap.name, "Identity");
                assert_eq!(stored.file_name, "uploaded.yaml");

                let fetched = server.get(&format!("/api/roadmaps/{}", stored.id)).await;
                fetched.assert_status_ok();
                assert_eq!(fetched.json::<StoredRoadmap>(), stored);
            });
        }

        it "records the uploaded file name" {
            block_on(async {
                let (_dir, server) = setup();
                let response = server
                    .post("/api/roadmaps")
                    .add_header(
                        HeaderName::from_static("x-file-name"),
                        HeaderValue::from_static("identity.yaml"),
                    )
                    .text(IDENTITY)
                    .await;

                response.assert_status(StatusCode::CREATED);
                assert_eq!(response.json::<StoredRoadmap>().file_name, "identity.yaml");
            });
        }

        it "rejects invalid roadmaps without storing them" {
            block_on(async {
                let (_dir, server) = setup();
                let duplicate = IDENTITY.replace("status: in-progress", "status: in-progress\n    - {id: sso, name: Again, start: a, end: b, status: planned}");

                let response = server.post("/api/roadmaps").text(duplicate).await;

                response.assert_status(StatusCode::BAD_REQUEST);
                let body = response.json::<Value>();
                assert_eq!(body["error"], "Invalid roadmap: validation failed: duplicate item id: sso");
                assert!(server.get("/api/roadmaps").await.json::<Vec<StoredRoadmap>>().is_empty());
            });
        }

        it "rejects malformed yaml" {
            block_on(async {
                let (_dir, server) = setup();
                let response = server.post("/api/roadmaps").text("roadmap: [").await;
                response.assert_status(StatusCode::BAD_REQUEST);
            });
        }
    }

    describe "batch upload" {
        it "stores every document in the stream and ignores a trailing separator" {
            block_on(async {
                let (_dir, server) = setup();
                let response = server
                    .post("/api/roadmaps/batch")
                    .add_header(
                        HeaderName::from_static("x-file-name"),
                        HeaderValue::from_static("org.yaml"),
                    )
                    .text(format!("{IDENTITY}---{PAYMENTS}---\n"))
                    .await;

                response.assert_status(StatusCode::CREATED);
                let batch = response.json::<BatchResponse>();
                assert_eq!(batch.count, 2);
                assert_eq!(batch.roadmaps[0].file_name, "org-part1.yaml");
                assert_eq!(batch.roadmaps[1].file_name, "org-part2.yaml");
                assert_eq!(server.get("/api/roadmaps").await.json::<Vec<StoredRoadmap>>().len(), 2);
            });
        }

        it "rejects a file without roadmaps" {
            block_on(async {
                let (_dir, server) = setup();
                let response = server.post("/api/roadmaps/batch").text("---\n").await;

                response.assert_status(StatusCode::BAD_REQUEST);
                let body = response.json::<Value>();
                assert_eq!(body["error"], "Invalid roadmap file: no roadmaps found in file");
            });
        }

        it "stores nothing when one document is invalid" {
            block_on(async {
                let (_dir, server) = setup();
                let broken = PAYMENTS.replace("dependencies: [design]", "dependencies: [ghost]");

                let response = server
                    .post("/api/roadmaps/batch")
                    .text(format!("{IDENTITY}---{broken}"))
                    .await;

                response.assert_status(StatusCode::BAD_REQUEST);
                let body = response.json::<Value>();
                assert_eq!(
                    body["error"],
                    "Invalid roadmap file: validation failed for roadmap 2 (Payments): item checkout: dependency ghost does not exist"
                );
                assert!(server.get("/api/roadmaps").await.json::<Vec<StoredRoadmap>>().is_empty());
            });
        }
    }

    describe "roadmap lookup and deletion" {
        it "returns 404 for unknown roadmaps" {
            block_on(async {
                let (_dir, server) = setup();
                server.get("/api/roadmaps/unknown").await.assert_status_not_found();
                server.delete("/api/roadmaps/unknown").await.assert_status_not_found();
                server.get("/api/roadmaps/unknown/dependencies").await.assert_status_not_found();
                server.get("/api/roadmaps/unknown/dependents").await.assert_status_not_found();
            });
        }

        it "deletes a stored roadmap" {
            block_on(async {
                let (_dir, server) = setup();
                let stored = upload(&server, IDENTITY).await;
                let path = format!("/api/roadmaps/{}", stored.id);

                server.delete(&path).await.assert_status(StatusCode::NO_CONTENT);
                server.get(&path).await.assert_status_not_found();
            });
        }
    }

    describe "dependency endpoints" {
        it "lists the dependencies a roadmap declares" {
            block_on(async {
                let (_dir, server) = setup();
                let payments = upload(&server, PAYMENTS).await;

                let response = server.get(&format!("/api/roadmaps/{}/dependencies", payments.id)).await;

                response.assert_status_ok();
                let body = response.json::<DependenciesResponse>();
                assert_eq!(body.roadmap_name, "Payments");
                assert_eq!(body.dependencies.len(), 1);
                assert_eq!(body.dependencies[0].item_id, "checkout");
                assert_eq!(body.dependencies[0].external_dependencies.len(), 2);
            });
        }

        it "lists items in other roadmaps that depend on a roadmap" {
            block_on(async {
                let (_dir, server) = setup();
                let identity = upload(&server, IDENTITY).await;
                let payments = upload(&server, PAYMENTS).await;

                let response = server.get(&format!("/api/roadmaps/{}/dependents", identity.id)).await;

                response.assert_status_ok();
                let body = response.json::<DependentsResponse>();
                assert_eq!(body.roadmap_id, identity.id);
                assert_eq!(body.roadmap_name, "Identity");
                assert_eq!(body.count, 2);
                assert!(body.dependents.iter().all(|d| d.source_roadmap_id == payments.id));
                let targets: Vec<_> = body.dependents.iter().map(|d| d.target_item_id.as_str()).collect();
                assert_eq!(targets, vec!["sso", "mfa"]);
            });
        }

        it "validates every external dependency in the corpus" {
            block_on(async {
                let (_dir, server) = setup();
                upload(&server, IDENTITY).await;
                upload(&server, PAYMENTS).await;

                let report = server.get("/api/dependencies/validate").await.json::<ValidationReport>();

                assert_eq!((report.total, report.valid, report.invalid), (2, 1, 1));
                let invalid = report.results.iter().find(|r| !r.valid).unwrap();
                assert_eq!(invalid.source_reference, "Payments:checkout");
                assert_eq!(invalid.target_reference, "Identity:mfa");
                assert_eq!(invalid.error.as_deref(), Some("item 'mfa' not found in roadmap 'Identity'"));
            });
        }

        it "reports references to a deleted roadmap as dangling" {
            block_on(async {
                let (_dir, server) = setup();
                let identity = upload(&server, IDENTITY).await;
                upload(&server, PAYMENTS).await;

                server.delete(&format!("/api/roadmaps/{}", identity.id)).await.assert_status(StatusCode::NO_CONTENT);
                let report = server.get("/api/dependencies/validate").await.json::<ValidationReport>();

                assert_eq!(report.invalid, 2);
                assert!(report.results.iter().all(|r| r.error.as_deref() == Some("roadmap named 'Identity' not found")));
            });
        }
    }
}
