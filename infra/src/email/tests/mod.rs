mod mock_email_tests;
