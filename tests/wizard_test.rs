//! MCQ 向导状态机与请求契约的端到端测试
//!
//! 分析服务用本地 TCP 响应器模拟，不依赖外部网络

use mcq_batch_analysis::{
    mcq_quota, AnalysisClient, AppError, McqWizard, ValidationError, WizardState,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio_test::assert_ok;

/// 模拟一个固定响应的分析服务
///
/// 返回 (base_url, 收到的请求计数)
async fn spawn_responder(status: &str, body: &str) -> (String, Arc<AtomicUsize>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("绑定端口失败");
    let addr = listener.local_addr().expect("获取地址失败");
    let hits = Arc::new(AtomicUsize::new(0));
    let hits_in_task = hits.clone();

    let response = format!(
        "HTTP/1.1 {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
        status,
        body.len(),
        body
    );

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            hits_in_task.fetch_add(1, Ordering::SeqCst);
            read_full_request(&mut socket).await;
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
        }
    });

    (format!("http://{}", addr), hits)
}

/// 读完整个请求（头部 + content-length 指定的请求体）再响应
async fn read_full_request(socket: &mut TcpStream) {
    let mut buf = Vec::new();
    let mut tmp = [0u8; 1024];

    loop {
        let n = match socket.read(&mut tmp).await {
            Ok(0) | Err(_) => break,
            Ok(n) => n,
        };
        buf.extend_from_slice(&tmp[..n]);

        if let Some(pos) = find_subsequence(&buf, b"\r\n\r\n") {
            let headers = String::from_utf8_lossy(&buf[..pos]).to_ascii_lowercase();
            let content_length = headers
                .lines()
                .find_map(|line| {
                    line.strip_prefix("content-length:")
                        .map(|v| v.trim().parse::<usize>().unwrap_or(0))
                })
                .unwrap_or(0);
            if buf.len() >= pos + 4 + content_length {
                break;
            }
        }
    }
}

fn find_subsequence(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

const BATCH_RESULT_BODY: &str = r#"{
    "total_sheets_analyzed": 2,
    "summary": { "average_percentage": 75.0, "highest_score": 90, "lowest_score": 60 },
    "individual_results": [
        { "student_id": 1, "score": 3, "total_questions": 3,
          "score_percentage": 100.0, "grade": "A+" },
        { "student_id": "2", "score": 2, "total_questions": 3,
          "score_percentage": 66.7, "grade": "C" }
    ]
}"#;

#[test]
fn test_quota_lookup_is_total_and_case_insensitive() {
    // 相同输入重复查询结果一致
    for _ in 0..3 {
        assert_eq!(mcq_quota("standard"), 200);
        assert_eq!(mcq_quota("Standard"), 200);
        assert_eq!(mcq_quota("PREMIUM"), 500);
        assert_eq!(mcq_quota("free"), 0);
        assert_eq!(mcq_quota("basic"), 0);
        assert_eq!(mcq_quota("no-such-plan"), 0);
    }
}

#[test]
fn test_free_plan_starts_disabled() {
    let mut wizard = McqWizard::new("free");
    assert_eq!(wizard.state(), WizardState::Disabled);
    assert!(wizard.is_disabled());

    // 任何动作都无法进入录入步骤
    wizard.set_answer_key_input("A,B,C");
    let err = wizard.submit_answer_key().unwrap_err();
    assert!(matches!(
        err,
        AppError::Validation(ValidationError::PlanRestricted { .. })
    ));
    assert_eq!(wizard.state(), WizardState::Disabled);

    wizard.reset();
    assert_eq!(wizard.state(), WizardState::Disabled);
}

#[test]
fn test_answer_key_step_validation() {
    let mut wizard = McqWizard::new("standard");
    assert_eq!(wizard.state(), WizardState::AnswerKeyEntry);

    // 空答案键被拒绝并停留在第一步
    let err = wizard.submit_answer_key().unwrap_err();
    assert!(matches!(
        err,
        AppError::Validation(ValidationError::EmptyAnswerKey)
    ));
    assert_eq!(wizard.state(), WizardState::AnswerKeyEntry);
    assert!(wizard.error().is_some());

    // 合法答案键进入第二步，错误被清除
    wizard.set_answer_key_input("a, b ,C,d");
    wizard.submit_answer_key().expect("答案键应通过校验");
    assert_eq!(wizard.state(), WizardState::StudentAnswersEntry);
    assert!(wizard.error().is_none());
    let key = wizard.answer_key().expect("应保存解析后的答案键");
    assert_eq!(key.choices(), &["A", "B", "C", "D"]);
}

#[test]
fn test_back_returns_without_validation() {
    let mut wizard = McqWizard::new("standard");
    wizard.set_answer_key_input("A,B");
    wizard.submit_answer_key().expect("答案键应通过校验");

    wizard.back_to_answer_key();
    assert_eq!(wizard.state(), WizardState::AnswerKeyEntry);

    // 返回后可以修改并重新提交
    wizard.set_answer_key_input("A,B,C");
    wizard.submit_answer_key().expect("答案键应通过校验");
    assert_eq!(wizard.state(), WizardState::StudentAnswersEntry);
}

#[tokio::test]
async fn test_quota_exceeded_sends_no_request() {
    let (base_url, hits) = spawn_responder("200 OK", BATCH_RESULT_BODY).await;
    let client = AnalysisClient::with_base_url(base_url).expect("创建客户端失败");

    let mut wizard = McqWizard::new("standard");
    wizard.set_answer_key_input("A,B");
    wizard.submit_answer_key().expect("答案键应通过校验");

    // 201 行超过 standard 套餐的 200 份配额
    let lines: Vec<&str> = std::iter::repeat("A,B").take(201).collect();
    wizard.set_student_answers_input(lines.join("\n"));

    let err = wizard.analyze(&client).await.unwrap_err();
    match err {
        AppError::Validation(ValidationError::QuotaExceeded {
            quota, submitted, ..
        }) => {
            assert_eq!(quota, 200);
            assert_eq!(submitted, 201);
        }
        other => panic!("意外的错误类型: {:?}", other),
    }

    // 错误信息同时给出配额与提交数量
    let message = wizard.error().expect("应有错误信息");
    assert!(message.contains("200"));
    assert!(message.contains("201"));

    // 没有发起任何网络调用，状态停留在第二步
    assert_eq!(hits.load(Ordering::SeqCst), 0);
    assert_eq!(wizard.state(), WizardState::StudentAnswersEntry);
}

#[tokio::test]
async fn test_empty_student_answers_sends_no_request() {
    let (base_url, hits) = spawn_responder("200 OK", BATCH_RESULT_BODY).await;
    let client = AnalysisClient::with_base_url(base_url).expect("创建客户端失败");

    let mut wizard = McqWizard::new("standard");
    wizard.set_answer_key_input("A,B,C");
    wizard.submit_answer_key().expect("答案键应通过校验");
    wizard.set_student_answers_input("   \n ");

    let err = wizard.analyze(&client).await.unwrap_err();
    assert!(matches!(
        err,
        AppError::Validation(ValidationError::EmptyStudentAnswers)
    ));
    assert_eq!(hits.load(Ordering::SeqCst), 0);
    assert_eq!(wizard.state(), WizardState::StudentAnswersEntry);
}

#[tokio::test]
async fn test_mismatched_sheet_sends_no_request() {
    let (base_url, hits) = spawn_responder("200 OK", BATCH_RESULT_BODY).await;
    let client = AnalysisClient::with_base_url(base_url).expect("创建客户端失败");

    let mut wizard = McqWizard::new("standard");
    wizard.set_answer_key_input("A,B,C");
    wizard.submit_answer_key().expect("答案键应通过校验");
    wizard.set_student_answers_input("A,B,C\nA,B");

    let err = wizard.analyze(&client).await.unwrap_err();
    match err {
        AppError::Validation(ValidationError::SheetLengthMismatch {
            line,
            expected,
            actual,
        }) => {
            assert_eq!(line, 2);
            assert_eq!(expected, 3);
            assert_eq!(actual, 2);
        }
        other => panic!("意外的错误类型: {:?}", other),
    }
    assert_eq!(hits.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_successful_analysis_then_reset() {
    let (base_url, hits) = spawn_responder("200 OK", BATCH_RESULT_BODY).await;
    let client = AnalysisClient::with_base_url(base_url).expect("创建客户端失败");

    let mut wizard = McqWizard::new("premium");
    wizard.set_answer_key_input("A,B,C");
    wizard.submit_answer_key().expect("答案键应通过校验");
    wizard.set_student_answers_input("A,B,C\nA,X,C");

    assert_ok!(wizard.analyze(&client).await);
    assert_eq!(hits.load(Ordering::SeqCst), 1);
    assert_eq!(wizard.state(), WizardState::ResultsDisplay);

    let result = wizard.result().expect("应有分析结果");
    assert_eq!(result.total_sheets_analyzed, 2);
    assert_eq!(result.summary.average_percentage, 75.0);
    // 数字与字符串形式的 student_id 都被归一成字符串
    assert_eq!(result.individual_results[0].student_id, "1");
    assert_eq!(result.individual_results[1].student_id, "2");
    assert_eq!(result.individual_results[1].grade, "C");

    // "重新分析"清空全部状态并回到第一步
    wizard.reset();
    assert_eq!(wizard.state(), WizardState::AnswerKeyEntry);
    assert!(wizard.answer_key().is_none());
    assert!(wizard.result().is_none());
    assert!(wizard.error().is_none());
    assert!(wizard.answer_key_input().is_empty());
    assert!(wizard.student_answers_input().is_empty());
}

#[tokio::test]
async fn test_server_error_keeps_inputs_and_sets_generic_message() {
    let (base_url, hits) = spawn_responder("500 Internal Server Error", "{\"error\":\"boom\"}").await;
    let client = AnalysisClient::with_base_url(base_url).expect("创建客户端失败");

    let mut wizard = McqWizard::new("standard");
    wizard.set_answer_key_input("A,B,C");
    wizard.submit_answer_key().expect("答案键应通过校验");
    wizard.set_student_answers_input("A,B,C\nA,X,C");

    let err = wizard.analyze(&client).await.unwrap_err();
    assert!(matches!(err, AppError::Api(_)));
    assert_eq!(hits.load(Ordering::SeqCst), 1);

    // 停留在第二步，输入全部保留，只展示统一的失败提示
    assert_eq!(wizard.state(), WizardState::StudentAnswersEntry);
    assert_eq!(wizard.answer_key_input(), "A,B,C");
    assert_eq!(wizard.student_answers_input(), "A,B,C\nA,X,C");
    assert!(wizard.answer_key().is_some());
    assert_eq!(
        wizard.error(),
        Some("Failed to analyze MCQ sheets. Please try again.")
    );

    // 用户可以直接重试：换一个正常的服务端，同一向导成功完成
    let (ok_url, _) = spawn_responder("200 OK", BATCH_RESULT_BODY).await;
    let ok_client = AnalysisClient::with_base_url(ok_url).expect("创建客户端失败");
    wizard.analyze(&ok_client).await.expect("重试应该成功");
    assert_eq!(wizard.state(), WizardState::ResultsDisplay);
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    // 先占一个端口再释放，确保连接被拒绝
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("绑定端口失败");
    let addr = listener.local_addr().expect("获取地址失败");
    drop(listener);

    let client =
        AnalysisClient::with_base_url(format!("http://{}", addr)).expect("创建客户端失败");

    let mut wizard = McqWizard::new("standard");
    wizard.set_answer_key_input("A,B");
    wizard.submit_answer_key().expect("答案键应通过校验");
    wizard.set_student_answers_input("A,B");

    let err = wizard.analyze(&client).await.unwrap_err();
    assert!(matches!(err, AppError::Api(_)));
    assert_eq!(wizard.state(), WizardState::StudentAnswersEntry);
    assert!(wizard.error().is_some());
}
