mod pending_verification_tests;
