pub mod document_tests;
