//! 에러 케이스 테스트
//!
//! 각종 에러 조건에서의 처리 방식을 검증

use logi_merge_rust::error::LogiMergeError;
use logi_merge_rust::keywords::KeywordConfig;
use logi_merge_rust::loader;
use logi_merge_rust::pipeline;
use std::path::Path;
use tempfile::tempdir;

/// 존재하지 않는 파일을 읽는 경우
#[test]
fn test_load_nonexistent_file() {
    let result = loader::load_workbook(Path::new("/nonexistent/재고.xlsx"));
    assert!(result.is_err());

    let err = result.unwrap_err();
    assert!(matches!(err, LogiMergeError::FileNotFound(_)));
}

/// 엑셀이 아닌 파일을 읽는 경우
#[test]
fn test_load_not_an_excel_file() {
    let dir = tempdir().expect("임시 폴더 생성 실패");
    let path = dir.path().join("가짜.xlsx");
    std::fs::write(&path, "그냥 텍스트").unwrap();

    let result = loader::load_workbook(&path);
    assert!(matches!(
        result,
        Err(LogiMergeError::UnreadableSource { .. })
    ));
}

/// 마스터 파일이 없으면 배치 전체가 에러
#[test]
fn test_missing_master_fails_batch() {
    let config = KeywordConfig::default();
    let result = pipeline::process_batch(&[], Some(Path::new("/없는/마스터.xlsx")), &config);
    assert!(result.is_err());
}

/// 마스터에 데이터 행이 없으면 InvalidMaster
#[test]
fn test_empty_master_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("빈마스터.xlsx");

    let mut workbook = rust_xlsxwriter::Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.write_string(0, 0, "한국코드").unwrap();
    worksheet.write_string(0, 1, "품목명").unwrap();
    workbook.save(&path).unwrap();

    let config = KeywordConfig::default();
    let result = pipeline::load_mapping(&path, &config);
    assert!(matches!(result, Err(LogiMergeError::InvalidMaster(_))));
}

/// 에러 메시지가 원인을 담는지 확인
#[test]
fn test_error_display() {
    let errors = vec![
        LogiMergeError::UnreadableSource {
            file: "깨진.xlsx".into(),
            reason: "zip 아님".into(),
        },
        LogiMergeError::HeaderNotFound,
        LogiMergeError::ColumnUnresolved {
            missing: "코드, 수량".into(),
            found: "비고, 메모".into(),
        },
        LogiMergeError::InvalidMaster("빈 파일".into()),
        LogiMergeError::FileNotFound("없는파일.xlsx".into()),
        LogiMergeError::Keywords("목록 비어 있음".into()),
    ];

    for err in errors {
        let display = format!("{}", err);
        assert!(!display.is_empty(), "에러 메시지가 비었음: {:?}", err);
    }
}

/// ColumnUnresolved 메시지에 빠진 역할과 발견된 컬럼이 모두 담긴다
#[test]
fn test_column_unresolved_message() {
    let err = LogiMergeError::ColumnUnresolved {
        missing: "수량".into(),
        found: "코드, 품명, 비고".into(),
    };
    let display = format!("{}", err);

    assert!(display.contains("수량"));
    assert!(display.contains("비고"));
}

/// 진단(inspect)은 머리글을 못 찾아도 에러가 아니다
#[test]
fn test_inspect_survives_missing_header() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("메모.xlsx");

    let mut workbook = rust_xlsxwriter::Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.write_string(0, 0, "그냥 메모입니다").unwrap();
    workbook.save(&path).unwrap();

    let config = KeywordConfig::default();
    let inspections = pipeline::inspect_file(&path, &config).unwrap();
    assert_eq!(inspections.len(), 1);
    assert!(inspections[0].header_row.is_none());
    assert!(inspections[0].columns.is_empty());
}
