mod api_tasks_failures;
